use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
};

use chrono::{DateTime, TimeZone, Utc};
use profilegen_source::{RepositoryRecord, RepositorySource, SourceError, SourceRef};

/// Timestamp `days` days after the epoch.
pub fn day(days: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(days * 86_400, 0).unwrap()
}

pub fn record(name: &str, pushed_days: i64) -> RepositoryRecord {
    RepositoryRecord::new(name, Some(day(pushed_days)))
}

pub fn names(records: &[RepositoryRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

pub fn unavailable(status: u16) -> SourceError {
    SourceError::Unavailable {
        status,
        url: "https://api.github.com/test".to_string(),
        body: "failure".to_string(),
    }
}

/// In-memory source with scripted answers.
#[derive(Default)]
pub struct MockSource {
    pub listing: Vec<RepositoryRecord>,
    pub listing_error: Option<u16>,
    pub releases: HashSet<String>,
    pub release_failures: HashMap<String, u16>,
    pub fork_sources: HashMap<String, String>,
    pub fork_failures: HashSet<String>,
    pub fetch_calls: Cell<usize>,
    pub release_calls: RefCell<Vec<String>>,
    pub fork_calls: RefCell<Vec<String>>,
}

impl MockSource {
    pub fn with_listing(listing: Vec<RepositoryRecord>) -> Self {
        Self {
            listing,
            ..Self::default()
        }
    }
}

impl RepositorySource for MockSource {
    fn fetch_all(&self, _identity: &str) -> Result<Vec<RepositoryRecord>, SourceError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        match self.listing_error {
            Some(status) => Err(unavailable(status)),
            None => Ok(self.listing.clone()),
        }
    }

    fn has_published_release(&self, _identity: &str, repo: &str) -> Result<bool, SourceError> {
        self.release_calls.borrow_mut().push(repo.to_string());
        if let Some(status) = self.release_failures.get(repo) {
            return Err(unavailable(*status));
        }
        Ok(self.releases.contains(repo))
    }

    fn fork_source(&self, _identity: &str, repo: &str) -> Result<Option<SourceRef>, SourceError> {
        self.fork_calls.borrow_mut().push(repo.to_string());
        if self.fork_failures.contains(repo) {
            return Err(unavailable(500));
        }
        Ok(self.fork_sources.get(repo).map(|url| {
            SourceRef {
                full_name: None,
                html_url: url.clone(),
            }
        }))
    }
}
