//! CLI commands and argument parsing.

pub mod completions;
pub mod latest_tag;
pub mod release;
pub mod utils;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use semrel_core::Config;

/// semrel - resolve the latest semver tag and cut releases from CI.
#[derive(Parser)]
#[command(name = "semrel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the config file
    #[arg(long, global = true, default_value = Config::DEFAULT_PATH)]
    pub config: PathBuf,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the highest semver tag of a repository, prefixed with `v`
    LatestTag(latest_tag::LatestTagArgs),

    /// Create a tag or release for a commit
    Release(release::ReleaseArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// GitHub Enterprise endpoint overrides shared by all remote commands.
#[derive(Args, Debug, Clone, Default)]
pub struct EndpointArgs {
    /// GitHub Enterprise API URL
    #[arg(short = 'a', long = "github-api-url")]
    pub api_url: Option<String>,

    /// GitHub Enterprise uploads URL (derived from the API URL if omitted)
    #[arg(short = 'u', long = "github-uploads-url")]
    pub uploads_url: Option<String>,
}
