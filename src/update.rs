//! Categorization of outdated dependencies for the upgrade menu
//!
//! The three buckets form a safety ladder: `patch` and `minor` hold
//! only records of exactly that severity, while `all` is the union of
//! every upgradeable record including major bumps. The buckets are
//! offered as independent choices, not nested menu levels.

use crate::domain::{DependencyRecord, UpdateType};
use serde::{Deserialize, Serialize};

/// A single name@version pair to hand to the package manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOption {
    /// Package name
    pub name: String,
    /// Version to install
    pub latest_version: String,
}

impl UpdateOption {
    fn from_record(record: &DependencyRecord) -> Option<Self> {
        record.latest_version.as_ref().map(|latest| Self {
            name: record.name.clone(),
            latest_version: latest.clone(),
        })
    }

    /// Formats the package-manager argument for this update
    pub fn spec(&self) -> String {
        format!("{}@{}", self.name, self.latest_version)
    }
}

/// The user's bucket selection in the upgrade prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateChoice {
    Patch,
    Minor,
    All,
}

/// Outdated records partitioned by update severity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBuckets {
    /// Patch-severity updates only
    pub patch: Vec<UpdateOption>,
    /// Minor-severity updates only
    pub minor: Vec<UpdateOption>,
    /// Every upgradeable record, major included
    pub all: Vec<UpdateOption>,
}

impl UpdateBuckets {
    /// Returns true when nothing is upgradeable
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// The options behind a prompt choice
    pub fn for_choice(&self, choice: UpdateChoice) -> &[UpdateOption] {
        match choice {
            UpdateChoice::Patch => &self.patch,
            UpdateChoice::Minor => &self.minor,
            UpdateChoice::All => &self.all,
        }
    }

    /// Number of major-only updates (present in `all` but in neither
    /// severity bucket)
    pub fn major_count(&self) -> usize {
        self.all.len() - self.patch.len() - self.minor.len()
    }
}

/// Partitions records into upgrade buckets
///
/// Only outdated, non-skipped records with a resolved latest version
/// qualify; everything else is ignored here.
pub fn categorize(records: &[DependencyRecord]) -> UpdateBuckets {
    let mut buckets = UpdateBuckets::default();

    for record in records {
        if !record.is_outdated || record.is_skipped {
            continue;
        }
        let Some(option) = UpdateOption::from_record(record) else {
            continue;
        };

        buckets.all.push(option.clone());
        match record.update_type {
            Some(UpdateType::Patch) => buckets.patch.push(option),
            Some(UpdateType::Minor) => buckets.minor.push(option),
            _ => {}
        }
    }

    buckets
}
