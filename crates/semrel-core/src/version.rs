//! Tolerant semantic version parsing for tag names.
//!
//! Tags in the wild are rarely strict semver: `v1.2`, `01.4.0` and `2` all
//! show up. [`parse_tolerant`] normalizes those into a canonical three-part
//! version before handing them to [`semver::Version::parse`].

use std::cmp::Ordering;

use semver::Version;

use crate::error::{Error, Result};
use crate::release::TAGS_REF_PREFIX;

/// Prefix prepended to every rendered version.
pub const TAG_PREFIX: &str = "v";

/// The version reported when no tag matches: `0.0.0`.
#[must_use]
pub const fn zero() -> Version {
    Version::new(0, 0, 0)
}

/// Render a version the way it is printed for CI consumption, e.g. `v1.2.3`.
#[must_use]
pub fn format_tag(version: &Version) -> String {
    format!("{TAG_PREFIX}{version}")
}

/// Parse a version string, accepting common deviations from strict semver.
///
/// - Surrounding whitespace and a single leading `v` are ignored.
/// - Leading zeros in the numeric components are dropped (`01.02.3`).
/// - Missing minor/patch components default to zero (`v1.2` is `1.2.0`),
///   unless the short form carries pre-release or build metadata.
///
/// # Errors
/// Returns [`Error::InvalidVersion`] if the normalized string is still not
/// valid semver.
pub fn parse_tolerant(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix(TAG_PREFIX).unwrap_or(trimmed);

    let mut parts: Vec<String> = trimmed
        .splitn(3, '.')
        .map(strip_leading_zeros)
        .collect();

    if parts.len() < 3 {
        if parts
            .last()
            .is_some_and(|last| last.contains(['-', '+']))
        {
            return Err(Error::InvalidVersion {
                input: input.to_string(),
                reason: "short version cannot contain pre-release or build metadata".into(),
            });
        }
        parts.resize(3, "0".to_string());
    }

    let normalized = parts.join(".");
    Version::parse(&normalized).map_err(|e| Error::InvalidVersion {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Compare two versions by semver precedence, ignoring build metadata.
///
/// `1.0.0+build.1` and `1.0.0` are equal here, while [`Version`]'s own
/// `Ord` also orders the build identifiers.
#[must_use]
pub fn precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// Parse a raw reference such as `refs/tags/v1.2.3` into a version.
///
/// # Errors
/// Returns [`Error::InvalidVersion`] if the tag name is not a version.
pub fn parse_tag_ref(raw: &str) -> Result<Version> {
    parse_tolerant(&raw.replacen(TAGS_REF_PREFIX, "", 1))
}

fn strip_leading_zeros(part: &str) -> String {
    if part.len() <= 1 {
        return part.to_string();
    }

    let stripped = part.trim_start_matches('0');
    if stripped.starts_with(|c: char| c.is_ascii_digit()) {
        stripped.to_string()
    } else {
        format!("0{stripped}")
    }
}
