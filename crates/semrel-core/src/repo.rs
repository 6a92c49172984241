//! Repository coordinates.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A remote repository identified as `owner/name`.
///
/// # Examples
///
/// ```
/// use semrel_core::RepoSlug;
///
/// let slug: RepoSlug = "octo-org/widgets".parse().unwrap();
/// assert_eq!(slug.owner(), "octo-org");
/// assert_eq!(slug.name(), "widgets");
///
/// assert!("widgets".parse::<RepoSlug>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Parse `owner/name`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRepository`] unless the input has exactly one
    /// `/` with a non-empty, whitespace-free part on each side.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidRepository(input.to_string());

        let (owner, name) = input.trim().split_once('/').ok_or_else(invalid)?;
        let valid_part = |part: &str| !part.is_empty() && !part.contains(['/', ' ', '\t']);
        if !valid_part(owner) || !valid_part(name) {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Repository owner (user or organization).
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
