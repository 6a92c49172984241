//! Trait abstraction for the GitHub operations semrel needs.
//!
//! This module defines the `ReleaseApi` trait which abstracts the remote
//! repository, enabling dependency injection and testability.

use crate::{CreateRef, CreateRelease, GitRef, Release, Result};

/// Remote repository operations used by semrel.
///
/// This trait abstracts GitHub API calls, allowing for:
/// - Dependency injection in services
/// - Mock implementations for testing
///
/// All methods take `owner` and `repo` as parameters to support
/// operations across different repositories.
pub trait ReleaseApi: Send + Sync {
    /// List all reference names under `refs/tags/`.
    ///
    /// Returns [`Error::RepoNotFound`](crate::Error::RepoNotFound) when the
    /// repository (or its tag namespace) cannot be found, so callers can
    /// tell "no tags yet" apart from auth and transport failures.
    fn list_tag_refs(
        &self,
        owner: &str,
        repo: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    /// Create a git reference.
    fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: CreateRef,
    ) -> impl std::future::Future<Output = Result<GitRef>> + Send;

    /// Create a release.
    fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: CreateRelease,
    ) -> impl std::future::Future<Output = Result<Release>> + Send;
}
