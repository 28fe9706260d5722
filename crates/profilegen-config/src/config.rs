use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;
use tracing::{debug, info};

use crate::{
    annotations::annotate_toml_table,
    error::{ConfigError, Result},
    utils::{parse_duration, xdg_config_home},
};

pub const CONFIG_ENV: &str = "PROFILEGEN_CONFIG";
pub const DEFAULT_OUTPUT: &str = "README.md";
pub const DEFAULT_TITLE: &str = "My Repositories";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "profilegen";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
pub const DEFAULT_RELEASE_CHECK_INTERVAL: &str = "250ms";

/// profilegen configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, Documented, DocumentedFields)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub username whose public repositories are listed.
    pub user: Option<String>,

    /// File with repository names to leave out, one per line.
    /// Lines starting with `#` are ignored.
    pub exclude_file: Option<String>,

    /// File with repository names to show first, in the given order.
    pub priority_file: Option<String>,

    /// File with freeform lines for the Contact section.
    pub contact_file: Option<String>,

    /// File with AI image credits, one `name|image|alt|title|width|height` per line.
    pub ai_credits_file: Option<String>,

    /// Path of the generated document.
    /// Default: "README.md"
    pub output: Option<String>,

    /// Heading of the generated document.
    /// Default: "My Repositories"
    pub title: Option<String>,

    /// Base URL of the GitHub REST API (change for GitHub Enterprise).
    /// Default: "https://api.github.com"
    pub api_url: Option<String>,

    /// User agent sent with every request.
    /// Default: "profilegen"
    pub user_agent: Option<String>,

    /// Upper bound for a single HTTP request (e.g. "30s").
    /// Default: "30s"
    pub request_timeout: Option<String>,

    /// Minimum pause between per-repository lookups (e.g. "250ms").
    /// Default: "250ms"
    pub release_check_interval: Option<String>,

    /// Look up the upstream repository of forks so the card can link to it.
    /// Default: true
    pub resolve_fork_sources: Option<bool>,
}

/// Config path from `PROFILEGEN_CONFIG`, else `$XDG_CONFIG_HOME/profilegen/config.toml`.
pub fn default_config_path() -> PathBuf {
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => xdg_config_home().join("profilegen").join("config.toml"),
    }
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            user: None,
            exclude_file: None,
            priority_file: None,
            contact_file: None,
            ai_credits_file: None,
            output: Some(DEFAULT_OUTPUT.to_string()),
            title: Some(DEFAULT_TITLE.to_string()),
            api_url: Some(DEFAULT_API_URL.to_string()),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT.to_string()),
            release_check_interval: Some(DEFAULT_RELEASE_CHECK_INTERVAL.to_string()),
            resolve_fork_sources: Some(true),
        }
    }

    /// Loads the configuration file at `path`.
    ///
    /// A missing file yields an empty configuration unless `required` is set,
    /// in which case it is an error.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        let config = match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loaded configuration from {}", path.display());
                toml::from_str::<Self>(&content)?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                if required {
                    return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
                }
                debug!("No configuration file at {}", path.display());
                Self::default()
            }
            Err(err) => {
                return Err(ConfigError::IoError {
                    action: "reading config",
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks fields whose syntax is only known after parsing.
    pub fn validate(&self) -> Result<()> {
        self.request_timeout()?;
        self.release_check_interval()?;
        Ok(())
    }

    pub fn output(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        duration_field(
            "request_timeout",
            self.request_timeout.as_deref(),
            DEFAULT_REQUEST_TIMEOUT,
        )
    }

    pub fn release_check_interval(&self) -> Result<Duration> {
        duration_field(
            "release_check_interval",
            self.release_check_interval.as_deref(),
            DEFAULT_RELEASE_CHECK_INTERVAL,
        )
    }

    pub fn resolve_fork_sources(&self) -> bool {
        self.resolve_fork_sources.unwrap_or(true)
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut(), true)?;

        Ok(doc)
    }
}

/// Parses a duration field, falling back to `default` when unset.
pub fn duration_field(field: &'static str, value: Option<&str>, default: &str) -> Result<Duration> {
    let value = value.unwrap_or(default);
    parse_duration(value).ok_or_else(|| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
    })
}

/// Writes the annotated default configuration to `path`, refusing to overwrite.
pub fn generate_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(ConfigError::ConfigAlreadyExists(path.to_path_buf()));
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ConfigError::IoError {
            action: "creating config directory",
            path: parent.to_path_buf(),
            source: err,
        })?;
    }

    fs::write(path, annotated_doc.to_string()).map_err(|err| ConfigError::IoError {
        action: "writing config",
        path: path.to_path_buf(),
        source: err,
    })?;
    info!(
        "Default configuration file generated with documentation at: {}",
        path.display()
    );
    Ok(())
}
