//! Error types for profilegen-core.

use std::path::PathBuf;

use miette::Diagnostic;
use profilegen_config::error::ConfigError;
use profilegen_source::SourceError;
use thiserror::Error;

/// Fatal errors of a profile generation run.
///
/// Per-repository enrichment failures never show up here; they are reported
/// as [`crate::pipeline::EnrichmentWarning`]s instead.
#[derive(Error, Diagnostic, Debug)]
pub enum ProfileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Source unavailable: {0}")]
    #[diagnostic(
        code(profilegen::source_unavailable),
        help("Check your internet connection, the username and the API rate limit")
    )]
    SourceUnavailable(#[from] SourceError),

    #[error("Failed to read {kind} file {}", path.display())]
    #[diagnostic(
        code(profilegen::input_read),
        help("Check that the file exists and is readable")
    )]
    InputReadFailure {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed line {line} in {}: {reason}", path.display())]
    #[diagnostic(
        code(profilegen::malformed_input),
        help("Expected name|image-path|alt-text|title-text|width|height")
    )]
    MalformedInput {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    #[diagnostic(code(profilegen::render))]
    RenderFailure(#[from] RenderError),

    #[error("Failed to write output file {}", path.display())]
    #[diagnostic(
        code(profilegen::output_write),
        help("Check that the output directory exists and is writable")
    )]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("GitHub username is required")]
    #[diagnostic(
        code(profilegen::missing_user),
        help("Pass --user <name> or set `user` in the config file")
    )]
    MissingIdentity,
}

/// Failure reported by a [`crate::render::Renderer`].
#[derive(Error, Debug)]
#[error("Failed to render document: {0}")]
pub struct RenderError(pub String);

impl From<std::fmt::Error> for RenderError {
    fn from(_: std::fmt::Error) -> Self {
        Self("formatter error".to_string())
    }
}

/// Attaches the input kind and path to IO errors from reading input files.
pub trait InputContext<T> {
    fn input_context(self, kind: &'static str, path: &std::path::Path) -> Result<T, ProfileError>;
}

impl<T> InputContext<T> for std::io::Result<T> {
    fn input_context(self, kind: &'static str, path: &std::path::Path) -> Result<T, ProfileError> {
        self.map_err(|source| {
            ProfileError::InputReadFailure {
                kind,
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
