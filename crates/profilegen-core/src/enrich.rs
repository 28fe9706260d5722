use std::fmt;

use profilegen_source::{RepositoryRecord, RepositorySource};
use tracing::{debug, warn};

use crate::throttle::Throttle;

/// Which lookup failed for a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentKind {
    Releases,
    ForkSource,
}

impl fmt::Display for EnrichmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Releases => write!(f, "release check"),
            Self::ForkSource => write!(f, "fork source lookup"),
        }
    }
}

/// A lookup that failed for one repository; the run carried on with a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentWarning {
    pub repository: String,
    pub kind: EnrichmentKind,
    pub message: String,
}

impl fmt::Display for EnrichmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed for {}: {}", self.kind, self.repository, self.message)
    }
}

/// Decorates records with data from per-repository lookups.
///
/// Lookups run one at a time, paced by a [`Throttle`]. A failing lookup only
/// affects the record it was made for.
pub struct Enricher<'a, S: RepositorySource + ?Sized> {
    source: &'a S,
    identity: &'a str,
    throttle: Throttle,
    resolve_fork_sources: bool,
}

impl<'a, S: RepositorySource + ?Sized> Enricher<'a, S> {
    pub fn new(source: &'a S, identity: &'a str, throttle: Throttle) -> Self {
        Self {
            source,
            identity,
            throttle,
            resolve_fork_sources: false,
        }
    }

    pub fn resolve_fork_sources(mut self, enabled: bool) -> Self {
        self.resolve_fork_sources = enabled;
        self
    }

    /// Enriches `records` in place and returns the failures encountered.
    pub fn enrich(&mut self, records: &mut [RepositoryRecord]) -> Vec<EnrichmentWarning> {
        let mut warnings = Vec::new();

        for record in records.iter_mut() {
            self.throttle.wait();
            record.has_releases = match self
                .source
                .has_published_release(self.identity, &record.name)
            {
                Ok(found) => {
                    debug!("{}: has releases = {}", record.name, found);
                    found
                }
                Err(err) => {
                    warnings.push(self.report(record, EnrichmentKind::Releases, err));
                    false
                }
            };

            if self.resolve_fork_sources && record.fork && record.source.is_none() {
                self.throttle.wait();
                match self.source.fork_source(self.identity, &record.name) {
                    Ok(source) => record.source = source,
                    Err(err) => {
                        warnings.push(self.report(record, EnrichmentKind::ForkSource, err))
                    }
                }
            }
        }

        warnings
    }

    fn report(
        &self,
        record: &RepositoryRecord,
        kind: EnrichmentKind,
        err: impl fmt::Display,
    ) -> EnrichmentWarning {
        let warning = EnrichmentWarning {
            repository: record.name.clone(),
            kind,
            message: err.to_string(),
        };
        warn!("{}", warning);
        warning
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_utils::{record, MockSource};

    fn enricher<'a>(source: &'a MockSource) -> Enricher<'a, MockSource> {
        Enricher::new(source, "someone", Throttle::new(Duration::ZERO))
    }

    #[test]
    fn test_sets_release_flags() {
        let mut source = MockSource::default();
        source.releases.insert("tool".to_string());

        let mut records = vec![record("tool", 1), record("notes", 2)];
        let warnings = enricher(&source).enrich(&mut records);

        assert!(warnings.is_empty());
        assert!(records[0].has_releases);
        assert!(!records[1].has_releases);
        assert_eq!(*source.release_calls.borrow(), vec!["tool", "notes"]);
    }

    #[test]
    fn test_failure_is_isolated() {
        let mut source = MockSource::default();
        source.releases.insert("a".to_string());
        source.releases.insert("c".to_string());
        source.release_failures.insert("b".to_string(), 500);

        let mut records = vec![record("a", 1), record("b", 2), record("c", 3)];
        records[1].has_releases = true;
        let warnings = enricher(&source).enrich(&mut records);

        assert!(records[0].has_releases);
        assert!(!records[1].has_releases);
        assert!(records[2].has_releases);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].repository, "b");
        assert_eq!(warnings[0].kind, EnrichmentKind::Releases);
        assert!(warnings[0].message.contains("500"));
    }

    #[test]
    fn test_not_found_is_not_a_warning() {
        let source = MockSource::default();
        let mut records = vec![record("z", 1)];
        let warnings = enricher(&source).enrich(&mut records);

        assert!(!records[0].has_releases);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_fork_sources_resolved_when_enabled() {
        let mut source = MockSource::default();
        source
            .fork_sources
            .insert("forked".to_string(), "https://github.com/up/forked".to_string());

        let mut records = vec![record("forked", 1), record("own", 2)];
        records[0].fork = true;
        let warnings = enricher(&source)
            .resolve_fork_sources(true)
            .enrich(&mut records);

        assert!(warnings.is_empty());
        assert_eq!(
            records[0].source.as_ref().map(|s| s.html_url.as_str()),
            Some("https://github.com/up/forked")
        );
        assert!(records[1].source.is_none());
        assert_eq!(*source.fork_calls.borrow(), vec!["forked"]);
    }

    #[test]
    fn test_fork_sources_skipped_when_disabled() {
        let source = MockSource::default();
        let mut records = vec![record("forked", 1)];
        records[0].fork = true;
        enricher(&source).enrich(&mut records);

        assert!(source.fork_calls.borrow().is_empty());
    }

    #[test]
    fn test_fork_source_failure_degrades() {
        let mut source = MockSource::default();
        source.fork_failures.insert("forked".to_string());
        source.releases.insert("forked".to_string());

        let mut records = vec![record("forked", 1)];
        records[0].fork = true;
        let warnings = enricher(&source)
            .resolve_fork_sources(true)
            .enrich(&mut records);

        assert!(records[0].has_releases);
        assert!(records[0].source.is_none());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, EnrichmentKind::ForkSource);
    }

    #[test]
    fn test_warning_display() {
        let warning = EnrichmentWarning {
            repository: "b".to_string(),
            kind: EnrichmentKind::Releases,
            message: "timed out".to_string(),
        };
        assert_eq!(warning.to_string(), "release check failed for b: timed out");
    }
}
