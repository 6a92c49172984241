//! # semrel-core
//!
//! Core library for semrel, a release helper for CI pipelines.
//!
//! This crate holds everything that does not talk to the network:
//! - Tolerant parsing of tag names into semantic versions
//! - Version range expressions (`>=1.0.0 <2.0.0 || 3.x`)
//! - Release strategies and release requests
//! - Repository coordinates and the optional config file

pub mod config;
pub mod error;
pub mod range;
pub mod release;
pub mod repo;
pub mod version;

pub use config::Config;
pub use error::{Error, Result};
pub use range::VersionRange;
pub use release::{ReleaseRequest, ReleaseStrategy};
pub use repo::RepoSlug;
pub use semver::Version;
pub use version::{TAG_PREFIX, format_tag, parse_tolerant, precedence, zero};
