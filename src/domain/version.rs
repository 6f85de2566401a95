//! Version triple parsing and comparison
//!
//! Handles version specifiers as they appear in package.json:
//! - Exact: `1.2.3`
//! - Range prefixes: `^1.2.3`, `~1.2.3`, `>=1.2.3`, `<1.2.3`
//! - Trailing pre-release/build suffixes: `1.2.3-beta.1` (suffix ignored)
//!
//! Range prefixes carry no information needed for outdated-ness once
//! the target triple is extracted, so they are stripped before parsing.

use crate::error::VersionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static TRIPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)").expect("version triple pattern is valid")
});

/// A parsed major.minor.patch version
///
/// The derived `Ord` gives strict tuple ordering (major, then minor,
/// then patch), which is exactly the outdated-ness comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTriple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionTriple {
    /// Creates a triple from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a version specifier into a triple
    ///
    /// A leading run of range operators (`^`, `~`, `>`, `=`, `<`) is
    /// stripped; the remainder must start with `x.y.z`. Anything after
    /// the triple (pre-release tags, build metadata) is ignored.
    pub fn parse(spec: &str) -> Result<Self, VersionError> {
        let cleaned = spec.trim_start_matches(['^', '~', '>', '=', '<']);

        let caps = TRIPLE_RE
            .captures(cleaned)
            .ok_or_else(|| VersionError::InvalidFormat {
                spec: spec.to_string(),
            })?;

        let field = |i: usize| {
            caps[i]
                .parse::<u64>()
                .map_err(|_| VersionError::InvalidFormat {
                    spec: spec.to_string(),
                })
        };

        Ok(Self {
            major: field(1)?,
            minor: field(2)?,
            patch: field(3)?,
        })
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Severity of an available update, per semver convention on the
/// first differing version component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Patch,
    Minor,
    Major,
}

impl UpdateType {
    /// Plain label for display
    pub fn label(&self) -> &'static str {
        match self {
            UpdateType::Patch => "patch",
            UpdateType::Minor => "minor",
            UpdateType::Major => "major",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns true when `latest` is strictly greater than `current`
///
/// Strict tuple comparison: a higher patch next to a lower major does
/// NOT count as outdated.
pub fn is_outdated(current: VersionTriple, latest: VersionTriple) -> bool {
    latest > current
}

/// Determines the update severity between two versions
///
/// The first field (major, then minor, then patch) where `latest`
/// exceeds `current` decides; if none exceeds, patch is the fallback.
/// Only meaningful when `is_outdated` holds for the same pair.
pub fn update_type(current: VersionTriple, latest: VersionTriple) -> UpdateType {
    if latest.major > current.major {
        UpdateType::Major
    } else if latest.minor > current.minor {
        UpdateType::Minor
    } else {
        UpdateType::Patch
    }
}

/// Compares two raw specifier strings, failing open
///
/// Returns `(is_outdated, update_type)`; the severity is only present
/// when the pair is outdated. If either side does not parse, the pair
/// degrades to "not outdated, no severity" so one bad specifier never
/// blocks the rest of the check.
pub fn classify(current: &str, latest: &str) -> (bool, Option<UpdateType>) {
    match (VersionTriple::parse(current), VersionTriple::parse(latest)) {
        (Ok(cur), Ok(lat)) => {
            if is_outdated(cur, lat) {
                (true, Some(update_type(cur, lat)))
            } else {
                (false, None)
            }
        }
        _ => (false, None),
    }
}
