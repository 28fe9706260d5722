use error::ProfileError;

pub mod enrich;
pub mod error;
pub mod filter;
pub mod generate;
pub mod inputs;
pub mod names;
pub mod order;
pub mod pipeline;
pub mod render;
pub mod throttle;

#[cfg(test)]
mod test_utils;

pub use generate::{generate_profile, GenerationReport, ProfileRequest};
pub use render::{ProfileDocument, ReadmeRenderer, Renderer};

pub type ProfileResult<T> = std::result::Result<T, ProfileError>;
