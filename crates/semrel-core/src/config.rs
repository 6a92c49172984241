//! Configuration management for semrel.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// semrel configuration loaded from `.semrel.toml`.
///
/// Every field is optional; command-line flags take precedence over values
/// found here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub endpoint settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Settings for `semrel release`.
    #[serde(default)]
    pub release: ReleaseConfig,

    /// Settings for `semrel latest-tag`.
    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl Config {
    /// Default config file name, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = ".semrel.toml";

    /// Load config from a TOML file.
    ///
    /// A missing file yields the default config.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

/// GitHub-specific settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GitHubConfig {
    /// Custom API URL for GitHub Enterprise.
    pub api_url: Option<String>,

    /// Custom uploads URL for GitHub Enterprise.
    pub uploads_url: Option<String>,
}

/// Release settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReleaseConfig {
    /// Strategy name, validated when used (`none`, `tag` or `release`).
    pub strategy: Option<String>,
}

/// Tag resolution settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResolveConfig {
    /// Version range the resolved tag must satisfy.
    pub range: Option<String>,
}
