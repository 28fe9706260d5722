use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upstream repository a fork was created from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceRef {
    pub full_name: Option<String>,
    pub html_url: String,
}

/// A repository as listed by the remote service, plus enrichment data.
///
/// `has_releases` is never read from the listing; it stays `false` until the
/// enrichment stage sets it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<SourceRef>,
    #[serde(skip_deserializing, default)]
    pub has_releases: bool,
}

impl RepositoryRecord {
    /// Minimal record, mainly for tests and in-memory sources.
    pub fn new(name: impl Into<String>, pushed_at: Option<DateTime<Utc>>) -> Self {
        let name = name.into();
        let stamp = pushed_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self {
            html_url: format!("https://github.com/example/{name}"),
            name,
            description: None,
            language: None,
            homepage: None,
            fork: false,
            archived: false,
            stargazers_count: 0,
            forks_count: 0,
            created_at: stamp,
            updated_at: stamp,
            pushed_at,
            source: None,
            has_releases: false,
        }
    }

    pub fn releases_url(&self) -> String {
        format!("{}/releases", self.html_url.trim_end_matches('/'))
    }

    /// Non-empty homepage, if any.
    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.trim().is_empty())
    }
}

/// Per-repository detail response; only the upstream references are used.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RepositoryDetail {
    #[serde(default)]
    pub source: Option<SourceRef>,
    #[serde(default)]
    pub parent: Option<SourceRef>,
}

impl RepositoryDetail {
    pub fn upstream(self) -> Option<SourceRef> {
        self.source.or(self.parent)
    }
}
