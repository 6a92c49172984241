//! Mock implementation of `ReleaseApi` for testing services.

use std::sync::Mutex;

use semrel_github::{
    CreateRef, CreateRelease, Error, GitObject, GitRef, Release, ReleaseApi, Result,
};

/// A call recorded by [`MockReleaseApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListTagRefs { owner: String, repo: String },
    CreateRef { owner: String, repo: String, reference: CreateRef },
    CreateRelease { owner: String, repo: String, release: CreateRelease },
}

/// How the mock answers `list_tag_refs`.
enum ListBehavior {
    Refs(Vec<String>),
    NotFound,
    Fail(u16),
}

/// Mock implementation of `ReleaseApi` that records every call.
pub struct MockReleaseApi {
    list: ListBehavior,
    write_failure: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl MockReleaseApi {
    pub fn with_refs(refs: &[&str]) -> Self {
        Self::new(ListBehavior::Refs(
            refs.iter().map(ToString::to_string).collect(),
        ))
    }

    pub fn not_found() -> Self {
        Self::new(ListBehavior::NotFound)
    }

    pub fn failing_list(status: u16) -> Self {
        Self::new(ListBehavior::Fail(status))
    }

    /// Make `create_ref` and `create_release` fail with the given status.
    pub fn with_write_failure(mut self, status: u16) -> Self {
        self.write_failure = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn new(list: ListBehavior) -> Self {
        Self {
            list,
            write_failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn write_result(&self) -> Result<()> {
        match self.write_failure {
            Some(status) => Err(Error::ApiError {
                status,
                message: "Validation Failed".into(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for MockReleaseApi {
    fn default() -> Self {
        Self::with_refs(&[])
    }
}

impl ReleaseApi for MockReleaseApi {
    async fn list_tag_refs(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        self.record(Call::ListTagRefs {
            owner: owner.to_string(),
            repo: repo.to_string(),
        });

        match &self.list {
            ListBehavior::Refs(refs) => Ok(refs.clone()),
            ListBehavior::NotFound => Err(Error::RepoNotFound(format!("{owner}/{repo}"))),
            ListBehavior::Fail(401) => Err(Error::AuthenticationFailed),
            ListBehavior::Fail(status) => Err(Error::ApiError {
                status: *status,
                message: "Server Error".into(),
            }),
        }
    }

    async fn create_ref(&self, owner: &str, repo: &str, reference: CreateRef) -> Result<GitRef> {
        self.record(Call::CreateRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
            reference: reference.clone(),
        });
        self.write_result()?;

        Ok(GitRef {
            ref_name: reference.ref_name,
            object: GitObject { sha: reference.sha },
        })
    }

    async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        release: CreateRelease,
    ) -> Result<Release> {
        self.record(Call::CreateRelease {
            owner: owner.to_string(),
            repo: repo.to_string(),
            release: release.clone(),
        });
        self.write_result()?;

        Ok(Release {
            id: 1,
            html_url: format!(
                "https://github.com/{owner}/{repo}/releases/tag/{}",
                release.tag_name
            ),
            tag_name: release.tag_name,
            name: Some(release.name),
            draft: release.draft,
            prerelease: release.prerelease,
        })
    }
}
