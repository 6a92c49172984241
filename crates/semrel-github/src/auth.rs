//! Authentication handling for GitHub API.

use std::process::Command;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Environment variable checked by [`Auth::auto`].
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Authentication method for GitHub API.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Use token from gh CLI.
    GhCli,

    /// Use token from environment variable.
    EnvVar(String),

    /// Use a specific token.
    Token(SecretString),
}

impl Auth {
    /// Create auth from the first available method.
    ///
    /// Tries in order: `GITHUB_TOKEN` env var, gh CLI.
    #[must_use]
    pub fn auto() -> Self {
        if std::env::var(TOKEN_ENV_VAR).is_ok() {
            Self::EnvVar(TOKEN_ENV_VAR.into())
        } else {
            Self::GhCli
        }
    }

    /// Use an explicit token when given, otherwise fall back to [`Auth::auto`].
    #[must_use]
    pub fn from_token_or_auto(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.trim().is_empty() => Self::Token(SecretString::from(token)),
            _ => Self::auto(),
        }
    }

    /// Resolve the authentication to a token.
    ///
    /// # Errors
    /// Returns error if token cannot be obtained.
    pub fn resolve(&self) -> Result<SecretString> {
        match self {
            Self::GhCli => get_gh_token(),
            Self::EnvVar(var) => std::env::var(var)
                .ok()
                .filter(|t| !t.trim().is_empty())
                .map(SecretString::from)
                .ok_or(Error::NoToken),
            Self::Token(t) => {
                if t.expose_secret().trim().is_empty() {
                    Err(Error::NoToken)
                } else {
                    Ok(t.clone())
                }
            }
        }
    }
}

/// Get GitHub token from gh CLI.
fn get_gh_token() -> Result<SecretString> {
    let output = Command::new("gh").args(["auth", "token"]).output()?;

    if !output.status.success() {
        return Err(Error::NoToken);
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if token.is_empty() {
        return Err(Error::NoToken);
    }

    Ok(SecretString::from(token))
}
