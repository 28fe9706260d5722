use std::env;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use ureq::{http::Response, Body};
use url::Url;

use crate::{
    error::{Result, SourceError},
    http_client::{ClientConfig, HttpClient},
    pagination::{collect_pages, PAGE_SIZE},
    traits::RepositorySource,
    types::{RepositoryDetail, RepositoryRecord, SourceRef},
};

pub const API_UPSTREAM: &str = "https://api.github.com";
pub const TOKEN_ENV: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Bearer token from the environment, checking `TOKEN_ENV` in order.
pub fn token_from_env() -> Option<String> {
    TOKEN_ENV
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

/// GitHub REST API client.
#[derive(Debug, Clone)]
pub struct Github {
    client: HttpClient,
    api_url: Url,
    page_size: usize,
}

impl Github {
    pub fn new(api_url: &str, config: &ClientConfig) -> Result<Self> {
        let api_url = Url::parse(api_url).map_err(|err| SourceError::InvalidUrl {
            url: api_url.to_string(),
            reason: err.to_string(),
        })?;
        if api_url.cannot_be_a_base() {
            return Err(SourceError::InvalidUrl {
                url: api_url.to_string(),
                reason: "URL cannot be used as an API base".to_string(),
            });
        }

        Ok(Self {
            client: HttpClient::new(config)?,
            api_url,
            page_size: PAGE_SIZE,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.has_token()
    }

    /// Joins path segments onto the API base, percent-encoding each one.
    ///
    /// # Examples
    ///
    /// ```
    /// use profilegen_source::{github::Github, http_client::ClientConfig};
    ///
    /// let gh = Github::new("https://api.github.com", &ClientConfig::default()).unwrap();
    /// let url = gh.endpoint(&["users", "octocat", "repos"]);
    /// assert_eq!(url.as_str(), "https://api.github.com/users/octocat/repos");
    /// ```
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn listing_url(&self, identity: &str, page: u32) -> Url {
        let mut url = self.endpoint(&["users", identity, "repos"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &self.page_size.to_string());
        url
    }

    fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        trace!("GET {}", url);
        let mut resp = self
            .client
            .get(url.as_str())
            .call()
            .map_err(|err| SourceError::network(url.as_str(), err))?;

        if !resp.status().is_success() {
            return Err(unavailable(url, &mut resp));
        }

        resp.body_mut()
            .read_json::<T>()
            .map_err(|err| SourceError::InvalidResponse {
                url: url.to_string(),
                reason: err.to_string(),
            })
    }

    /// Status of a lightweight `HEAD` probe, falling back to a single `GET`
    /// when the probe request itself fails.
    fn probe(&self, url: &Url) -> Result<Response<Body>> {
        trace!("HEAD {}", url);
        match self.client.head(url.as_str()).call() {
            Ok(resp) => Ok(resp),
            Err(err) => {
                debug!("HEAD {} failed ({}), retrying with GET", url, err);
                self.client
                    .get(url.as_str())
                    .call()
                    .map_err(|err| SourceError::network(url.as_str(), err))
            }
        }
    }
}

fn unavailable(url: &Url, resp: &mut Response<Body>) -> SourceError {
    let body = resp.body_mut().read_to_string().unwrap_or_default();
    SourceError::Unavailable {
        status: resp.status().as_u16(),
        url: url.to_string(),
        body: body.trim().to_string(),
    }
}

impl RepositorySource for Github {
    fn fetch_all(&self, identity: &str) -> Result<Vec<RepositoryRecord>> {
        collect_pages(self.page_size, |page| {
            let url = self.listing_url(identity, page);
            self.fetch_json::<Vec<RepositoryRecord>>(&url)
        })
    }

    fn has_published_release(&self, identity: &str, repo: &str) -> Result<bool> {
        let url = self.endpoint(&["repos", identity, repo, "releases", "latest"]);
        let mut resp = self.probe(&url)?;
        let status = resp.status();

        if status.is_success() {
            Ok(true)
        } else if status.as_u16() == 404 {
            Ok(false)
        } else {
            Err(unavailable(&url, &mut resp))
        }
    }

    fn fork_source(&self, identity: &str, repo: &str) -> Result<Option<SourceRef>> {
        let url = self.endpoint(&["repos", identity, repo]);
        match self.fetch_json::<RepositoryDetail>(&url) {
            Ok(detail) => Ok(detail.upstream()),
            Err(SourceError::Unavailable { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
