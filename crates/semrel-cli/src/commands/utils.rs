use std::path::Path;

use anyhow::{Context, Result};
use semrel_core::Config;
use semrel_github::{Auth, Endpoints, GitHubClient};

use crate::commands::EndpointArgs;
use crate::output;

/// Load the config file, falling back to defaults when it doesn't exist.
pub fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("could not load config {}", path.display()))
}

/// Resolve endpoints from flags first, then the config file.
pub fn endpoints(args: &EndpointArgs, config: &Config) -> Result<Endpoints> {
    let api_url = args.api_url.as_deref().or(config.github.api_url.as_deref());
    let uploads_url = args
        .uploads_url
        .as_deref()
        .or(config.github.uploads_url.as_deref());

    if api_url.is_none_or(|u| u.trim().is_empty()) && uploads_url.is_some() {
        output::warn("uploads URL given without an API URL - ignoring it");
    }

    Endpoints::from_overrides(api_url, uploads_url)
        .context("could not connect to github enterprise api")
}

/// Build a GitHub client for the given token (or the ambient one).
pub fn github_client(
    token: Option<String>,
    args: &EndpointArgs,
    config: &Config,
) -> Result<GitHubClient> {
    let endpoints = endpoints(args, config)?;
    let auth = Auth::from_token_or_auto(token);

    GitHubClient::with_endpoints(&auth, endpoints).context("Failed to authenticate with GitHub")
}
