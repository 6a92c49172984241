//! `semrel release` command - Create a tag or release for a commit.

use anyhow::Result;
use clap::Args;
use semrel_core::{Config, ReleaseRequest, ReleaseStrategy, RepoSlug};

use crate::commands::{EndpointArgs, utils};
use crate::services::ReleaseService;

/// Arguments for the release command.
#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Repository as OWNER/NAME
    pub repository: String,

    /// Commit SHA the tag or release points at
    pub target_commitish: String,

    /// Version used verbatim as tag and release name
    pub version: String,

    /// GitHub token (defaults to GITHUB_TOKEN, then `gh auth token`)
    pub token: Option<String>,

    /// Release strategy: none, tag or release [default: release]
    #[arg(short, long)]
    pub strategy: Option<String>,

    #[command(flatten)]
    pub endpoints: EndpointArgs,
}

/// Pick the strategy from the flag, then the config file, then the default.
pub fn resolve_strategy(flag: Option<&str>, config: &Config) -> Result<ReleaseStrategy> {
    match flag.or(config.release.strategy.as_deref()) {
        Some(name) => Ok(name.parse()?),
        None => Ok(ReleaseStrategy::default()),
    }
}

/// Run the release command.
pub fn run(args: ReleaseArgs, config: &Config) -> Result<()> {
    let repo = RepoSlug::parse(&args.repository)?;
    let strategy = resolve_strategy(args.strategy.as_deref(), config)?;
    let request = ReleaseRequest::new(args.target_commitish, args.version);

    let client = utils::github_client(args.token, &args.endpoints, config)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(ReleaseService::new(&client, &repo).execute(strategy, &request))?;

    Ok(())
}
