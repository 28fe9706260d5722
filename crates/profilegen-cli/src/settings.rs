use std::path::PathBuf;

use profilegen_config::config::{
    default_config_path, duration_field, Config, DEFAULT_RELEASE_CHECK_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT,
};
use profilegen_core::{error::ProfileError, ProfileRequest, ProfileResult};
use profilegen_source::http_client::{ClientConfig, DEFAULT_MAX_REDIRECTS};
use tracing::debug;

use crate::cli::Args;

/// Settings resolved once per run from flags, config file and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub client: ClientConfig,
    pub request: ProfileRequest,
}

/// Path of the config file and whether it has to exist.
pub fn config_location(args: &Args) -> (PathBuf, bool) {
    match &args.config {
        Some(path) => (path.clone(), true),
        None => (default_config_path(), false),
    }
}

pub fn load_config(args: &Args) -> ProfileResult<Config> {
    let (path, required) = config_location(args);
    debug!("Using config file {}", path.display());
    Ok(Config::load(&path, required)?)
}

impl Settings {
    /// Flags win over the config file, which wins over built-in defaults.
    /// `env_token` is only consulted when no `--token` was given.
    pub fn resolve(args: &Args, config: &Config, env_token: Option<String>) -> ProfileResult<Self> {
        let identity = args
            .user
            .as_deref()
            .or(config.user.as_deref())
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .ok_or(ProfileError::MissingIdentity)?
            .to_string();

        let timeout = duration_field(
            "timeout",
            args.timeout.as_deref().or(config.request_timeout.as_deref()),
            DEFAULT_REQUEST_TIMEOUT,
        )?;
        let release_check_interval = duration_field(
            "delay",
            args.delay
                .as_deref()
                .or(config.release_check_interval.as_deref()),
            DEFAULT_RELEASE_CHECK_INTERVAL,
        )?;

        let token = args
            .token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or(env_token);

        let client = ClientConfig {
            user_agent: args
                .user_agent
                .clone()
                .unwrap_or_else(|| config.user_agent().to_string()),
            token,
            proxy: args.proxy.clone(),
            timeout: Some(timeout),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        };

        let path_setting = |flag: &Option<PathBuf>, value: &Option<String>| {
            flag.clone().or_else(|| value.as_ref().map(PathBuf::from))
        };

        let request = ProfileRequest {
            identity,
            exclude_file: path_setting(&args.exclude, &config.exclude_file),
            priority_file: path_setting(&args.priority, &config.priority_file),
            contact_file: path_setting(&args.contact, &config.contact_file),
            ai_credits_file: path_setting(&args.ai_credits, &config.ai_credits_file),
            output: args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(config.output())),
            title: args
                .title
                .clone()
                .unwrap_or_else(|| config.title().to_string()),
            release_check_interval,
            resolve_fork_sources: !args.no_fork_sources && config.resolve_fork_sources(),
        };

        Ok(Self {
            api_url: args
                .api_url
                .clone()
                .unwrap_or_else(|| config.api_url().to_string()),
            client,
            request,
        })
    }
}
