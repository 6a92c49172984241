//! Tag resolution: find the highest semver tag of a repository.
//!
//! This service encapsulates the business logic for the `latest-tag`
//! command, accepting a trait-based client for testability.

use std::cmp::Ordering;

use anyhow::{Context, Result};
use semrel_core::{RepoSlug, Version, VersionRange, version};
use semrel_github::ReleaseApi;
use tracing::debug;

/// Compile an optional range expression; blank means unconstrained.
///
/// # Errors
/// Returns error if the expression is not a valid range.
pub fn compile_range(expr: Option<&str>) -> Result<Option<VersionRange>> {
    match expr.map(str::trim).filter(|e| !e.is_empty()) {
        Some(expr) => Ok(Some(VersionRange::parse(expr)?)),
        None => Ok(None),
    }
}

/// Pick the highest version among raw tag references.
///
/// References that don't parse as versions are skipped, as are versions
/// outside `range`. Build metadata is ignored when comparing, so of two
/// versions differing only in build metadata the first listed wins.
/// Returns `0.0.0` when nothing qualifies.
pub fn select_latest<S: AsRef<str>>(refs: &[S], range: Option<&VersionRange>) -> Version {
    let mut latest = version::zero();

    for raw in refs {
        let raw = raw.as_ref();
        let candidate = match version::parse_tag_ref(raw) {
            Ok(candidate) => candidate,
            Err(e) => {
                debug!(reference = raw, error = %e, "skipping non-version tag");
                continue;
            }
        };

        if range.is_some_and(|r| !r.matches(&candidate)) {
            debug!(reference = raw, "tag outside of range");
            continue;
        }

        if version::precedence(&candidate, &latest) == Ordering::Greater {
            latest = candidate;
        }
    }

    latest
}

/// Service resolving the latest tag of one repository.
pub struct TagResolver<'a, H: ReleaseApi> {
    client: &'a H,
    repo: &'a RepoSlug,
}

impl<'a, H: ReleaseApi> TagResolver<'a, H> {
    /// Create a new resolver.
    #[must_use]
    pub const fn new(client: &'a H, repo: &'a RepoSlug) -> Self {
        Self { client, repo }
    }

    /// Resolve the highest tag matching `range`.
    ///
    /// A repository that cannot be found resolves to `0.0.0`.
    ///
    /// # Errors
    /// Returns error if listing the tags fails for any other reason.
    pub async fn resolve(&self, range: Option<&VersionRange>) -> Result<Version> {
        let refs = match self
            .client
            .list_tag_refs(self.repo.owner(), self.repo.name())
            .await
        {
            Ok(refs) => refs,
            Err(semrel_github::Error::RepoNotFound(repo)) => {
                debug!(%repo, "repository not found, treating as untagged");
                return Ok(version::zero());
            }
            Err(e) => return Err(e).context("could not list git refs"),
        };

        debug!(count = refs.len(), repo = %self.repo, "listed tag refs");
        Ok(select_latest(&refs, range))
    }
}
