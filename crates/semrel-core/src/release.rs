//! Release strategies and the request they act on.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Namespace under which tag references live.
pub const TAGS_REF_PREFIX: &str = "refs/tags/";

/// What to create for a new version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseStrategy {
    /// Do nothing.
    None,
    /// Create a lightweight tag pointing at the target commit.
    Tag,
    /// Create a full release (which also creates its tag).
    #[default]
    Release,
}

impl ReleaseStrategy {
    /// Strategy name as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tag => "tag",
            Self::Release => "release",
        }
    }
}

impl FromStr for ReleaseStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "tag" => Ok(Self::Tag),
            "release" => Ok(Self::Release),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for ReleaseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The commit and version a release or tag is created for.
///
/// The version is used verbatim: no `v` prefix is added or stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Commit SHA (or commitish) the tag/release points at.
    pub target: String,
    /// Version string, used as tag name and release name.
    pub version: String,
}

impl ReleaseRequest {
    /// Create a new release request.
    #[must_use]
    pub fn new(target: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            version: version.into(),
        }
    }

    /// Fully qualified tag reference, e.g. `refs/tags/2.3.4`.
    #[must_use]
    pub fn tag_ref(&self) -> String {
        format!("{TAGS_REF_PREFIX}{}", self.version)
    }
}
