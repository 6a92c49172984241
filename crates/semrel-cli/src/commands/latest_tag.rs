//! `semrel latest-tag` command - Print the highest semver tag.

use anyhow::Result;
use clap::Args;
use semrel_core::{Config, RepoSlug, format_tag};

use crate::commands::{EndpointArgs, utils};
use crate::output;
use crate::services::{TagResolver, compile_range};

/// Arguments for the latest-tag command.
#[derive(Args, Debug)]
pub struct LatestTagArgs {
    /// Repository as OWNER/NAME
    pub repository: String,

    /// GitHub token (defaults to GITHUB_TOKEN, then `gh auth token`)
    pub token: Option<String>,

    /// Only consider versions in this range, e.g. ">=1.0.0 <2.0.0"
    #[arg(short, long)]
    pub range: Option<String>,

    #[command(flatten)]
    pub endpoints: EndpointArgs,
}

/// Run the latest-tag command.
pub fn run(args: LatestTagArgs, config: &Config) -> Result<()> {
    let repo = RepoSlug::parse(&args.repository)?;

    // Local input is validated before anything goes over the wire
    let range_expr = args.range.as_deref().or(config.resolve.range.as_deref());
    let range = compile_range(range_expr)?;

    let client = utils::github_client(args.token, &args.endpoints, config)?;
    let rt = tokio::runtime::Runtime::new()?;
    let latest = rt.block_on(TagResolver::new(&client, &repo).resolve(range.as_ref()))?;

    output::essential(&format_tag(&latest));
    Ok(())
}
