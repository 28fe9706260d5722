use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum SourceError {
    #[error("Invalid URL: {url}")]
    #[diagnostic(
        code(profilegen_source::invalid_url),
        help("Check the configured API base URL")
    )]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid proxy: {proxy}")]
    #[diagnostic(
        code(profilegen_source::invalid_proxy),
        help("Use a proxy URL such as http://host:port or socks5://host:port")
    )]
    InvalidProxy {
        proxy: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Request to {url} failed")]
    #[diagnostic(
        code(profilegen_source::network),
        help("Check your internet connection or try again later")
    )]
    Network {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("GitHub API returned status {status} for {url}: {body}")]
    #[diagnostic(
        code(profilegen_source::unavailable),
        help("A 403 or 429 usually means the rate limit was hit; pass a token with --token or GITHUB_TOKEN")
    )]
    Unavailable {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Invalid response from {url}: {reason}")]
    #[diagnostic(code(profilegen_source::invalid_response))]
    InvalidResponse { url: String, reason: String },
}

impl SourceError {
    /// HTTP status reported by the remote service, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unavailable { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn network(url: impl Into<String>, err: ureq::Error) -> Self {
        Self::Network {
            url: url.into(),
            source: Box::new(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_carries_status_and_body() {
        let err = SourceError::Unavailable {
            status: 403,
            url: "https://api.github.com/users/octocat/repos".to_string(),
            body: "{\"message\":\"API rate limit exceeded\"}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("/users/octocat/repos"));
        assert!(msg.contains("API rate limit exceeded"));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_network_error_has_source() {
        let err = SourceError::network("https://api.github.com", ureq::Error::ConnectionFailed);
        assert!(err.to_string().contains("https://api.github.com"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_invalid_response_display() {
        let err = SourceError::InvalidResponse {
            url: "https://api.github.com/x".to_string(),
            reason: "expected an array".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid response from https://api.github.com/x: expected an array"
        );
    }

    #[test]
    fn test_source_error_debug() {
        let err = SourceError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(format!("{err:?}").contains("InvalidUrl"));
    }
}
