//! GitHub API types.

use serde::{Deserialize, Serialize};

/// Request to create a git reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRef {
    /// Fully qualified reference name, e.g. `refs/tags/1.2.3`.
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// Commit SHA the reference points at.
    pub sha: String,
}

/// A git reference as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitRef {
    /// Fully qualified reference name.
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// Object the reference points at.
    pub object: GitObject,
}

/// The object a [`GitRef`] points at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitObject {
    /// Object SHA.
    pub sha: String,
}

/// Request to create a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRelease {
    /// Tag the release is attached to (created if missing).
    pub tag_name: String,

    /// Release title.
    pub name: String,

    /// Commitish the tag is created from.
    pub target_commitish: String,

    /// Whether the release is a draft.
    pub draft: bool,

    /// Whether the release is marked as a pre-release.
    pub prerelease: bool,
}

/// A GitHub release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release ID.
    pub id: u64,

    /// Tag name.
    pub tag_name: String,

    /// Release title.
    pub name: Option<String>,

    /// Release URL.
    pub html_url: String,

    /// Whether the release is a draft.
    #[serde(default)]
    pub draft: bool,

    /// Whether the release is a pre-release.
    #[serde(default)]
    pub prerelease: bool,
}
