//! Version range expressions.
//!
//! A range is a disjunction of conjunctions of comparators:
//!
//! ```text
//! >=1.0.0 <2.0.0 || >=3.1.0
//! ```
//!
//! Comparators within a group are separated by whitespace and must all hold;
//! groups are separated by `||` and at least one must hold. Supported
//! operators are `=`, `==`, `!=`, `!`, `<`, `<=`, `>`, `>=`; a bare version
//! means equality. `x`, `X` or `*` may replace the minor or patch component.
//!
//! # Examples
//!
//! ```
//! use semrel_core::{VersionRange, parse_tolerant};
//!
//! let range = VersionRange::parse(">=1.0.0 <2.0.0").unwrap();
//! assert!(range.matches(&parse_tolerant("v1.4.2").unwrap()));
//! assert!(!range.matches(&parse_tolerant("v2.0.0").unwrap()));
//! ```

use std::cmp::Ordering;

use semver::Version;

use crate::error::{Error, Result};
use crate::version::{parse_tolerant, precedence};

/// Comparison operator of a single comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    /// Operator spellings, longest first so prefixes don't shadow them.
    const SPELLINGS: [(&'static str, Self); 8] = [
        (">=", Self::Ge),
        ("<=", Self::Le),
        ("!=", Self::Ne),
        ("==", Self::Eq),
        (">", Self::Gt),
        ("<", Self::Lt),
        ("=", Self::Eq),
        ("!", Self::Ne),
    ];

    fn split(token: &str) -> (Self, &str) {
        Self::SPELLINGS
            .iter()
            .find_map(|(spelling, op)| token.strip_prefix(spelling).map(|rest| (*op, rest)))
            .unwrap_or((Self::Eq, token))
    }

    fn is_operator(token: &str) -> bool {
        Self::SPELLINGS.iter().any(|(spelling, _)| *spelling == token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    const fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        let ordering = precedence(version, &self.version);
        match self.op {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Lt => ordering == Ordering::Less,
            Op::Le => ordering != Ordering::Greater,
            Op::Gt => ordering == Ordering::Greater,
            Op::Ge => ordering != Ordering::Less,
        }
    }
}

/// A compiled version range expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    alternatives: Vec<Vec<Comparator>>,
}

impl VersionRange {
    /// Compile a range expression.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] if the expression is empty, contains an
    /// empty `||` group, a dangling operator, or an unparsable version.
    pub fn parse(expr: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidRange {
            range: expr.to_string(),
            reason,
        };

        if expr.trim().is_empty() {
            return Err(invalid("range expression is empty".into()));
        }

        let mut alternatives = Vec::new();
        for group in expr.split("||") {
            let mut comparators = Vec::new();
            for token in tokenize(group).map_err(&invalid)? {
                comparators.extend(parse_comparator(&token).map_err(&invalid)?);
            }
            if comparators.is_empty() {
                return Err(invalid("empty alternative around '||'".into()));
            }
            alternatives.push(comparators);
        }

        Ok(Self { alternatives })
    }

    /// Check whether a version satisfies the range.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|group| group.iter().all(|c| c.matches(version)))
    }
}

/// Split a group on whitespace, gluing a lone operator to the version after it.
fn tokenize(group: &str) -> std::result::Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut pending_op: Option<&str> = None;

    for word in group.split_whitespace() {
        if Op::is_operator(word) {
            if let Some(op) = pending_op {
                return Err(format!("operator '{op}' is not followed by a version"));
            }
            pending_op = Some(word);
            continue;
        }
        match pending_op.take() {
            Some(op) => tokens.push(format!("{op}{word}")),
            None => tokens.push(word.to_string()),
        }
    }

    if let Some(op) = pending_op {
        return Err(format!("operator '{op}' is not followed by a version"));
    }

    Ok(tokens)
}

/// Parse one token into one or more comparators (wildcards expand to two).
fn parse_comparator(token: &str) -> std::result::Result<Vec<Comparator>, String> {
    let (op, rest) = Op::split(token);
    if rest.is_empty() {
        return Err(format!("missing version in '{token}'"));
    }

    if let Some((lower, upper)) = wildcard_bounds(rest)? {
        return match op {
            Op::Eq => Ok(vec![
                Comparator::new(Op::Ge, lower),
                Comparator::new(Op::Lt, upper),
            ]),
            Op::Gt => Ok(vec![Comparator::new(Op::Ge, upper)]),
            Op::Ge => Ok(vec![Comparator::new(Op::Ge, lower)]),
            Op::Lt => Ok(vec![Comparator::new(Op::Lt, lower)]),
            Op::Le => Ok(vec![Comparator::new(Op::Lt, upper)]),
            Op::Ne => Err(format!("wildcard cannot be negated in '{token}'")),
        };
    }

    let version = parse_tolerant(rest).map_err(|e| e.to_string())?;
    Ok(vec![Comparator::new(op, version)])
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// For `1.x` return `(1.0.0, 2.0.0)`; for `1.2.x` return `(1.2.0, 1.3.0)`.
fn wildcard_bounds(raw: &str) -> std::result::Result<Option<(Version, Version)>, String> {
    let trimmed = raw.strip_prefix('v').unwrap_or(raw);
    let parts: Vec<&str> = trimmed.splitn(3, '.').collect();

    let Some(first_wild) = parts.iter().position(|p| is_wildcard(p)) else {
        return Ok(None);
    };
    if first_wild == 0 {
        return Err(format!("wildcard major version is not allowed in '{raw}'"));
    }
    if !parts[first_wild..].iter().all(|p| is_wildcard(p)) {
        return Err(format!("malformed wildcard version '{raw}'"));
    }

    let number = |part: &str| {
        part.parse::<u64>()
            .map_err(|_| format!("invalid number '{part}' in '{raw}'"))
    };
    let bump = |n: u64| {
        n.checked_add(1)
            .ok_or_else(|| format!("wildcard upper bound overflows in '{raw}'"))
    };
    let major = number(parts[0])?;

    if first_wild == 1 {
        Ok(Some((
            Version::new(major, 0, 0),
            Version::new(bump(major)?, 0, 0),
        )))
    } else {
        let minor = number(parts[1])?;
        Ok(Some((
            Version::new(major, minor, 0),
            Version::new(major, bump(minor)?, 0),
        )))
    }
}
