use crate::{
    error::Result,
    types::{RepositoryRecord, SourceRef},
};

/// A remote service that lists repositories and answers per-repository lookups.
///
/// Implementations are synchronous and keep no state between calls that
/// would change their answers.
pub trait RepositorySource {
    /// Fetch every repository owned by `identity`, following pagination to the end.
    fn fetch_all(&self, identity: &str) -> Result<Vec<RepositoryRecord>>;

    /// Whether `identity/repo` has at least one published release.
    ///
    /// "Not found" is a valid `false` answer, not an error.
    fn has_published_release(&self, identity: &str, repo: &str) -> Result<bool>;

    /// Upstream repository of a fork, or `None` when the service does not report one.
    fn fork_source(&self, identity: &str, repo: &str) -> Result<Option<SourceRef>>;
}
