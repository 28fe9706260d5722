use std::time::Duration;

use profilegen_source::{RepositoryRecord, RepositorySource};
use tracing::{debug, info, warn};

pub use crate::enrich::{EnrichmentKind, EnrichmentWarning};
use crate::{
    enrich::Enricher,
    error::ProfileError,
    filter::filter_excluded,
    names::{normalize_name, ExclusionSet, PriorityOrder},
    order::order_repositories,
    throttle::Throttle,
    ProfileResult,
};

/// Everything one pipeline pass needs, resolved up front.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub identity: String,
    pub exclusions: ExclusionSet,
    pub priority: PriorityOrder,
    pub release_check_interval: Duration,
    pub resolve_fork_sources: bool,
}

impl PipelineSettings {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            exclusions: ExclusionSet::default(),
            priority: PriorityOrder::default(),
            release_check_interval: Duration::ZERO,
            resolve_fork_sources: false,
        }
    }
}

/// Result of a pipeline pass: the records in display order plus the
/// non-fatal failures met on the way.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub repositories: Vec<RepositoryRecord>,
    pub warnings: Vec<EnrichmentWarning>,
    pub fetched: usize,
}

pub struct Pipeline<'a, S: RepositorySource + ?Sized> {
    source: &'a S,
    settings: &'a PipelineSettings,
}

impl<'a, S: RepositorySource + ?Sized> Pipeline<'a, S> {
    pub fn new(source: &'a S, settings: &'a PipelineSettings) -> Self {
        Self { source, settings }
    }

    /// fetch, filter, enrich, order.
    ///
    /// Only a failing fetch aborts; enrichment failures end up in
    /// [`PipelineOutcome::warnings`].
    pub fn run(&self) -> ProfileResult<PipelineOutcome> {
        let settings = self.settings;

        info!("Fetching repositories for user {}...", settings.identity);
        let fetched = self
            .source
            .fetch_all(&settings.identity)
            .map_err(ProfileError::SourceUnavailable)?;
        let fetched_count = fetched.len();
        info!("Found {} repositories", fetched_count);

        let mut repositories = filter_excluded(fetched, &settings.exclusions);
        info!(
            "After excluding, {} repositories remain",
            repositories.len()
        );

        for name in unmatched_priorities(&settings.priority, &repositories) {
            warn!("Priority entry '{}' does not match any listed repository", name);
        }

        info!("Checking releases for {} repositories...", repositories.len());
        let throttle = Throttle::new(settings.release_check_interval);
        debug!("Lookups are paced {:?} apart", throttle.interval());
        let warnings = Enricher::new(self.source, &settings.identity, throttle)
            .resolve_fork_sources(settings.resolve_fork_sources)
            .enrich(&mut repositories);

        let repositories = order_repositories(repositories, &settings.priority);

        Ok(PipelineOutcome {
            repositories,
            warnings,
            fetched: fetched_count,
        })
    }
}

/// Priority names that match none of `repositories`, in priority order.
fn unmatched_priorities<'a>(
    priority: &'a PriorityOrder,
    repositories: &[RepositoryRecord],
) -> Vec<&'a str> {
    priority
        .names()
        .iter()
        .filter(|name| {
            let key = normalize_name(name);
            !repositories.iter().any(|r| normalize_name(&r.name) == key)
        })
        .map(String::as_str)
        .collect()
}
