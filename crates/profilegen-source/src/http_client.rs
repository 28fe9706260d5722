use std::time::Duration;

use ureq::{
    http::{
        self,
        header::{ACCEPT, AUTHORIZATION},
        Uri,
    },
    typestate::WithoutBody,
    Agent, Proxy, RequestBuilder,
};

use crate::error::{Result, SourceError};

pub const DEFAULT_USER_AGENT: &str = "profilegen";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub token: Option<String>,
    pub proxy: Option<String>,
    pub timeout: Option<Duration>,
    pub max_redirects: u32,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("proxy", &self.proxy)
            .field("timeout", &self.timeout)
            .field("max_redirects", &self.max_redirects)
            .finish()
    }
}

impl Default for ClientConfig {
    /// Stable client identifier, a bounded timeout and no credential.
    ///
    /// # Examples
    ///
    /// ```
    /// use profilegen_source::http_client::ClientConfig;
    ///
    /// let cfg = ClientConfig::default();
    /// assert_eq!(cfg.user_agent, "profilegen");
    /// assert!(cfg.token.is_none());
    /// assert!(cfg.proxy.is_none());
    /// ```
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.into(),
            token: None,
            proxy: None,
            timeout: Some(DEFAULT_TIMEOUT),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl ClientConfig {
    /// Builds an HTTP `Agent` configured from this `ClientConfig`.
    ///
    /// Error statuses are handed back as ordinary responses so callers can
    /// report the status and body themselves.
    pub fn build(&self) -> Result<Agent> {
        let proxy = self
            .proxy
            .as_deref()
            .map(|proxy| {
                Proxy::new(proxy).map_err(|err| SourceError::InvalidProxy {
                    proxy: proxy.to_string(),
                    source: Box::new(err),
                })
            })
            .transpose()?;

        let config = Agent::config_builder()
            .proxy(proxy)
            .timeout_global(self.timeout)
            .max_redirects(self.max_redirects)
            .http_status_as_error(false)
            .user_agent(self.user_agent.as_str())
            .build();

        Ok(config.into())
    }
}

/// An `Agent` paired with the headers every request must carry.
#[derive(Clone, Debug)]
pub struct HttpClient {
    agent: Agent,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            agent: config.build()?,
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn get<T>(&self, uri: T) -> RequestBuilder<WithoutBody>
    where
        Uri: TryFrom<T>,
        <Uri as TryFrom<T>>::Error: Into<http::Error>,
    {
        self.apply_headers(self.agent.get(uri))
    }

    pub fn head<T>(&self, uri: T) -> RequestBuilder<WithoutBody>
    where
        Uri: TryFrom<T>,
        <Uri as TryFrom<T>>::Error: Into<http::Error>,
    {
        self.apply_headers(self.agent.head(uri))
    }

    fn apply_headers<B>(&self, req: RequestBuilder<B>) -> RequestBuilder<B> {
        let req = req
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(GITHUB_API_VERSION_HEADER, GITHUB_API_VERSION);

        match &self.token {
            Some(token) => req.header(AUTHORIZATION, &format!("Bearer {token}")),
            None => req,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.user_agent, "profilegen");
        assert!(config.token.is_none());
        assert!(config.proxy.is_none());
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[test]
    fn test_client_config_build() {
        let config = ClientConfig::default();
        assert!(config.build().is_ok());
    }

    #[test]
    fn test_client_config_invalid_proxy() {
        let config = ClientConfig {
            proxy: Some("::not a proxy::".to_string()),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.build(),
            Err(SourceError::InvalidProxy { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            token: Some("ghp_secret".to_string()),
            ..ClientConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("ghp_secret"));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let client = HttpClient::new(&ClientConfig {
            token: Some("   ".to_string()),
            ..ClientConfig::default()
        })
        .unwrap();
        assert!(!client.has_token());
    }
}
