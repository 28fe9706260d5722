//! Repository data source for profilegen.
//!
//! The [`traits::RepositorySource`] trait is what the pipeline talks to;
//! [`github::Github`] implements it on top of the GitHub REST API.

pub mod error;
pub mod github;
pub mod http_client;
pub mod pagination;
pub mod traits;
pub mod types;

pub use error::SourceError;
pub use github::Github;
pub use traits::RepositorySource;
pub use types::{RepositoryRecord, SourceRef};
