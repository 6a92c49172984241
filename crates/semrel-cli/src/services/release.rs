//! Release service: turn a release request into a tag, a release, or nothing.
//!
//! Each strategy performs at most one write and is never retried; a remote
//! create is not idempotent, so a failure is reported and left to the caller.

use anyhow::{Context, Result};
use semrel_core::{ReleaseRequest, ReleaseStrategy, RepoSlug};
use semrel_github::{CreateRef, CreateRelease, GitRef, Release, ReleaseApi};
use tracing::{debug, info};

/// What a strategy produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Strategy `none`: nothing was created.
    Skipped,
    /// A lightweight tag was created.
    Tagged(GitRef),
    /// A release was created.
    Released(Release),
}

/// Service for release operations with a trait-based client.
pub struct ReleaseService<'a, H: ReleaseApi> {
    client: &'a H,
    repo: &'a RepoSlug,
}

impl<'a, H: ReleaseApi> ReleaseService<'a, H> {
    /// Create a new release service.
    #[must_use]
    pub const fn new(client: &'a H, repo: &'a RepoSlug) -> Self {
        Self { client, repo }
    }

    /// Execute `strategy` for `request`.
    ///
    /// # Errors
    /// Returns error if the tag or release cannot be created.
    pub async fn execute(
        &self,
        strategy: ReleaseStrategy,
        request: &ReleaseRequest,
    ) -> Result<ReleaseOutcome> {
        debug!(%strategy, repo = %self.repo, version = %request.version, "executing release strategy");

        match strategy {
            ReleaseStrategy::None => {
                info!(version = %request.version, "release strategy is none, nothing to do");
                Ok(ReleaseOutcome::Skipped)
            }
            ReleaseStrategy::Tag => self.create_tag(request).await.map(ReleaseOutcome::Tagged),
            ReleaseStrategy::Release => self
                .create_release(request)
                .await
                .map(ReleaseOutcome::Released),
        }
    }

    /// Create a lightweight tag named after the version, verbatim.
    async fn create_tag(&self, request: &ReleaseRequest) -> Result<GitRef> {
        let reference = CreateRef {
            ref_name: request.tag_ref(),
            sha: request.target.clone(),
        };

        let created = self
            .client
            .create_ref(self.repo.owner(), self.repo.name(), reference)
            .await
            .context("could not create lightweight tag")?;

        info!(reference = %created.ref_name, sha = %created.object.sha, "created tag");
        Ok(created)
    }

    /// Create a published, non-prerelease release for the version.
    async fn create_release(&self, request: &ReleaseRequest) -> Result<Release> {
        let release = CreateRelease {
            tag_name: request.version.clone(),
            name: request.version.clone(),
            target_commitish: request.target.clone(),
            draft: false,
            prerelease: false,
        };

        let created = self
            .client
            .create_release(self.repo.owner(), self.repo.name(), release)
            .await
            .context("could not create GitHub release")?;

        info!(tag = %created.tag_name, url = %created.html_url, "created release");
        Ok(created)
    }
}
