use profilegen_source::RepositoryRecord;
use tracing::debug;

use crate::names::ExclusionSet;

/// Drops every record whose name is in `exclusions`, keeping the relative
/// order of the rest.
pub fn filter_excluded(
    records: Vec<RepositoryRecord>,
    exclusions: &ExclusionSet,
) -> Vec<RepositoryRecord> {
    if exclusions.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| {
            let excluded = exclusions.contains(&record.name);
            if excluded {
                debug!("Excluding repository {}", record.name);
            }
            !excluded
        })
        .collect()
}
