//! Classified dependency records
//!
//! A `DependencyRecord` is the unit of classification output: one per
//! declared dependency per run, immutable once built.

use super::UpdateType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display status of a classified dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// Excluded by a skip rule; the registry was never queried
    Skipped,
    /// Resolution failed or the package does not exist
    Unknown,
    /// Declared as `latest` or `*`; the resolved tag is informational
    LatestTag,
    /// A newer version is available
    Outdated(UpdateType),
    /// Already at the registry's latest version
    UpToDate,
}

/// Result of classifying a single declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Package name, possibly scoped (e.g. `@types/node`)
    pub name: String,
    /// The raw specifier as declared in the manifest
    pub current_version: String,
    /// Latest version per the registry; None when unresolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    /// Whether a newer version is available
    pub is_outdated: bool,
    /// Severity of the available update; None when not outdated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_type: Option<UpdateType>,
    /// Whether a skip rule excluded this package
    pub is_skipped: bool,
    /// Declaration group label (e.g. "Dependencies", "Dev Dependencies")
    pub category: String,
}

impl DependencyRecord {
    /// Creates a record for a package excluded by a skip rule
    pub fn skipped(
        name: impl Into<String>,
        current_version: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current_version: current_version.into(),
            latest_version: None,
            is_outdated: false,
            update_type: None,
            is_skipped: true,
            category: category.into(),
        }
    }

    /// Creates a record for a package whose latest version is unknown
    pub fn unresolved(
        name: impl Into<String>,
        current_version: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current_version: current_version.into(),
            latest_version: None,
            is_outdated: false,
            update_type: None,
            is_skipped: false,
            category: category.into(),
        }
    }

    /// Creates a record for a package with a resolved latest version
    pub fn resolved(
        name: impl Into<String>,
        current_version: impl Into<String>,
        latest_version: impl Into<String>,
        is_outdated: bool,
        update_type: Option<UpdateType>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current_version: current_version.into(),
            latest_version: Some(latest_version.into()),
            is_outdated,
            update_type,
            is_skipped: false,
            category: category.into(),
        }
    }

    /// Returns true when the declared specifier is the `latest` tag or
    /// the `*` wildcard
    pub fn has_latest_tag_specifier(&self) -> bool {
        matches!(self.current_version.as_str(), "latest" | "*")
    }

    /// Returns true when this record counts as up to date: resolved,
    /// not outdated, not skipped
    pub fn is_up_to_date(&self) -> bool {
        !self.is_outdated && !self.is_skipped && self.latest_version.is_some()
    }

    /// Returns true when the latest version is unknown (and the
    /// package was not skipped)
    pub fn is_unknown(&self) -> bool {
        self.latest_version.is_none() && !self.is_skipped
    }

    /// Display status for this record
    ///
    /// Skipped wins over everything; unresolved is Unknown; a
    /// `latest`/`*` specifier gets its own informational status rather
    /// than a semver comparison.
    pub fn status(&self) -> RecordStatus {
        if self.is_skipped {
            RecordStatus::Skipped
        } else if self.latest_version.is_none() {
            RecordStatus::Unknown
        } else if self.has_latest_tag_specifier() {
            RecordStatus::LatestTag
        } else if self.is_outdated {
            RecordStatus::Outdated(self.update_type.unwrap_or(UpdateType::Patch))
        } else {
            RecordStatus::UpToDate
        }
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.latest_version, self.is_outdated) {
            (Some(latest), true) => {
                write!(f, "{}: {} → {}", self.name, self.current_version, latest)
            }
            _ => write!(f, "{}: {}", self.name, self.current_version),
        }
    }
}
