//! # semrel-github
//!
//! GitHub API integration for semrel: listing tag references, creating
//! lightweight tags and creating releases, on github.com or GitHub
//! Enterprise.
//!
//! The [`ReleaseApi`] trait is the seam the rest of semrel programs
//! against; [`GitHubClient`] is the REST implementation.
//!
//! # Security
//!
//! Authentication tokens are stored using `SecretString` which automatically
//! zeroizes memory when dropped, reducing credential exposure in memory dumps.

mod auth;
mod client;
mod endpoint;
mod error;
mod traits;
mod types;

pub use auth::Auth;
pub use client::GitHubClient;
pub use endpoint::Endpoints;
pub use error::{Error, Result};
// Re-export SecretString for constructing Auth::Token
pub use secrecy::SecretString;
pub use traits::ReleaseApi;
pub use types::{CreateRef, CreateRelease, GitObject, GitRef, Release};
