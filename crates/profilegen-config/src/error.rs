use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(profilegen_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(profilegen_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(profilegen_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Configuration file already exists: {}", .0.display())]
    #[diagnostic(
        code(profilegen_config::already_exists),
        help("Remove the existing config file or pass a different path with --config")
    )]
    ConfigAlreadyExists(PathBuf),

    #[error("Configuration file not found: {}", .0.display())]
    #[diagnostic(
        code(profilegen_config::not_found),
        help("Create one with --defconfig or drop the --config option")
    )]
    ConfigNotFound(PathBuf),

    #[error("Invalid duration for `{field}`: {value}")]
    #[diagnostic(
        code(profilegen_config::invalid_duration),
        help("Use a number followed by ms, s, m, h or d (e.g. 250ms, 30s, 1m30s)")
    )]
    InvalidDuration { field: &'static str, value: String },

    #[error("IO error while {action}: {}", path.display())]
    #[diagnostic(code(profilegen_config::io))]
    IoError {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(profilegen_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
