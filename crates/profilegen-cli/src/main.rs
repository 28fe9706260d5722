use clap::Parser;
use cli::Args;
use logging::setup_logging;
use nu_ansi_term::Color::{Cyan, Green, Yellow};
use profilegen_config::config::generate_default_config;
use profilegen_core::{generate_profile, ProfileResult, ReadmeRenderer};
use profilegen_source::{github::token_from_env, Github};
use settings::{config_location, load_config, Settings};
use tracing::{debug, info, warn};
use utils::{set_color, Colored};

mod cli;
mod logging;
mod settings;
mod utils;

fn handle_cli() -> ProfileResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        set_color(false);
    }

    if args.defconfig {
        let (path, _) = config_location(&args);
        generate_default_config(&path)?;
        return Ok(());
    }

    let config = load_config(&args)?;
    let settings = Settings::resolve(&args, &config, token_from_env())?;
    debug!("Resolved client settings: {:?}", settings.client);

    let github = Github::new(&settings.api_url, &settings.client)?;
    if !github.is_authenticated() {
        warn!("No GitHub token found; unauthenticated requests have a low rate limit");
    }

    let report = generate_profile(&github, &ReadmeRenderer, &settings.request)?;

    if !report.warnings.is_empty() {
        warn!(
            "{} lookups failed; the affected cards use defaults",
            report.warnings.len()
        );
        for warning in &report.warnings {
            debug!("{}", warning);
        }
    }

    info!(
        "{} generated successfully with {} of {} repositories",
        Colored(Green, report.output.display()),
        Colored(Cyan, report.rendered),
        Colored(Yellow, report.fetched)
    );

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
