use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Args {
    /// GitHub username whose repositories are listed
    #[arg(short, long)]
    pub user: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN, then GH_TOKEN)
    #[arg(short, long)]
    pub token: Option<String>,

    /// File with repository names to exclude, one per line
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub exclude: Option<PathBuf>,

    /// File with repository names to show first, in order
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub priority: Option<PathBuf>,

    /// File with lines for the Contact section
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub contact: Option<PathBuf>,

    /// File with AI image credits: name|image|alt|title|width|height
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub ai_credits: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Heading of the generated document
    #[arg(long)]
    pub title: Option<String>,

    /// Provide custom config file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, value_hint = ValueHint::Url)]
    pub api_url: Option<String>,

    /// Set proxy
    #[arg(short = 'P', long)]
    pub proxy: Option<String>,

    /// Set user agent
    #[arg(short = 'A', long)]
    pub user_agent: Option<String>,

    /// Request timeout, e.g. 30s
    #[arg(long)]
    pub timeout: Option<String>,

    /// Pause between release checks, e.g. 250ms
    #[arg(long)]
    pub delay: Option<String>,

    /// Don't look up the upstream of forked repositories
    #[arg(long)]
    pub no_fork_sources: bool,

    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long)]
    pub quiet: bool,

    /// Output logs as json
    #[arg(short, long)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long)]
    pub no_color: bool,

    /// Write a documented default config file and exit
    #[arg(long)]
    pub defconfig: bool,
}
