//! Aggregate counts over a set of classified records
//!
//! The four top-level categories are disjoint for non-skipped records
//! (up-to-date, outdated, unknown) while skipped is counted
//! orthogonally; a record with no resolved latest version is unknown,
//! never up to date, even though both have `is_outdated == false`.

use super::{DependencyRecord, UpdateType};
use serde::{Deserialize, Serialize};

/// Category counts for a completed check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Every record, skipped ones included
    pub total: usize,
    /// Resolved, not outdated, not skipped
    pub up_to_date: usize,
    /// Outdated and not skipped
    pub outdated: usize,
    /// Outdated records with a major update available
    pub major: usize,
    /// Outdated records with a minor update available
    pub minor: usize,
    /// Outdated records with a patch update available
    pub patch: usize,
    /// No resolved latest version and not skipped
    pub unknown: usize,
    /// Excluded by a skip rule
    pub skipped: usize,
}

impl CheckSummary {
    /// Reduces a record list into category counts
    pub fn from_records(records: &[DependencyRecord]) -> Self {
        let mut summary = CheckSummary {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            if record.is_skipped {
                summary.skipped += 1;
                continue;
            }
            if record.latest_version.is_none() {
                summary.unknown += 1;
            } else if record.is_outdated {
                summary.outdated += 1;
                match record.update_type {
                    Some(UpdateType::Major) => summary.major += 1,
                    Some(UpdateType::Minor) => summary.minor += 1,
                    Some(UpdateType::Patch) | None => summary.patch += 1,
                }
            } else {
                summary.up_to_date += 1;
            }
        }

        summary
    }

    /// Returns true when any update is available
    pub fn has_outdated(&self) -> bool {
        self.outdated > 0
    }
}
