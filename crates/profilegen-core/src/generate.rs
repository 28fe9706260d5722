use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use profilegen_source::RepositorySource;
use tracing::info;

use crate::{
    error::ProfileError,
    inputs::{load_list, AiCredits},
    names::{ExclusionSet, PriorityOrder},
    pipeline::{EnrichmentWarning, Pipeline, PipelineSettings},
    render::{ProfileDocument, Renderer},
    ProfileResult,
};

/// A fully resolved generation request.
#[derive(Debug, Clone)]
pub struct ProfileRequest {
    pub identity: String,
    pub exclude_file: Option<PathBuf>,
    pub priority_file: Option<PathBuf>,
    pub contact_file: Option<PathBuf>,
    pub ai_credits_file: Option<PathBuf>,
    pub output: PathBuf,
    pub title: String,
    pub release_check_interval: Duration,
    pub resolve_fork_sources: bool,
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub fetched: usize,
    pub rendered: usize,
    pub warnings: Vec<EnrichmentWarning>,
}

/// Loads the inputs, runs the pipeline, renders and writes the document.
///
/// Every input file is read before the first network request. Nothing is
/// written unless rendering succeeded.
pub fn generate_profile<S, R>(
    source: &S,
    renderer: &R,
    request: &ProfileRequest,
) -> ProfileResult<GenerationReport>
where
    S: RepositorySource + ?Sized,
    R: Renderer + ?Sized,
{
    let exclusions = load_list("exclusion", request.exclude_file.as_deref())?;
    let priority = load_list("priority", request.priority_file.as_deref())?;
    let contact = load_list("contact", request.contact_file.as_deref())?;
    if request.contact_file.is_some() {
        info!("Loaded contact information with {} lines", contact.len());
    }
    let ai_credits = AiCredits::load(request.ai_credits_file.as_deref())?;

    let settings = PipelineSettings {
        identity: request.identity.clone(),
        exclusions: ExclusionSet::new(&exclusions),
        priority: PriorityOrder::new(&priority),
        release_check_interval: request.release_check_interval,
        resolve_fork_sources: request.resolve_fork_sources,
    };
    let outcome = Pipeline::new(source, &settings).run()?;

    let document = ProfileDocument {
        title: request.title.clone(),
        repositories: outcome.repositories,
        contact,
        ai_credits,
    };

    info!("Generating README to {}...", request.output.display());
    let rendered = renderer.render(&document)?;
    write_output(&request.output, &rendered)?;

    Ok(GenerationReport {
        output: request.output.clone(),
        fetched: outcome.fetched,
        rendered: document.repositories.len(),
        warnings: outcome.warnings,
    })
}

fn write_output(path: &Path, content: &str) -> ProfileResult<()> {
    fs::write(path, content).map_err(|source| {
        ProfileError::OutputWriteFailure {
            path: path.to_path_buf(),
            source,
        }
    })
}
