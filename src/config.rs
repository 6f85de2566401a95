//! Skip configuration loading and merging
//!
//! Skip rules come from two sources: an optional JSON config file in
//! the target directory and repeatable CLI flags. The merge policy is
//! fixed: the two lists are unioned with de-duplication, preserving
//! first-seen order (file entries first, then CLI entries).

use crate::error::ConfigError;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Config file names probed in the target directory, first hit wins
pub const CONFIG_FILENAMES: [&str; 3] = ["pkgpulse.config.json", ".pkgpulserc.json", ".pkgpulserc"];

/// Merged skip configuration for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipConfig {
    /// De-duplicated skip patterns in first-seen order
    pub patterns: Vec<String>,
    /// Warning to surface when the config file was unreadable
    pub warning: Option<String>,
}

impl SkipConfig {
    /// Loads the config file (if any) and merges CLI patterns into it
    pub fn load(dir: &Path, cli_patterns: &[String]) -> Self {
        let (file_patterns, warning) = match read_config_file(dir) {
            Ok(patterns) => (patterns, None),
            Err(err) => (Vec::new(), Some(format!("warning: {}", err))),
        };

        Self {
            patterns: merge_patterns(&file_patterns, cli_patterns),
            warning,
        }
    }

    /// Builds a config from CLI patterns only (no file lookup)
    pub fn from_cli(cli_patterns: &[String]) -> Self {
        Self {
            patterns: merge_patterns(&[], cli_patterns),
            warning: None,
        }
    }
}

/// Reads the first existing config file in the directory
///
/// A missing file is fine (empty rules); a present-but-broken file is
/// an error the caller degrades to a warning.
fn read_config_file(dir: &Path) -> Result<Vec<String>, ConfigError> {
    for filename in CONFIG_FILENAMES {
        let path = dir.join(filename);
        if !path.exists() {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        // only string entries count; anything else is dropped
        let patterns = value
            .get("skip")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        return Ok(patterns);
    }

    Ok(Vec::new())
}

/// Union of both sources, de-duplicated, first-seen order preserved
fn merge_patterns(file_patterns: &[String], cli_patterns: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    file_patterns
        .iter()
        .chain(cli_patterns.iter())
        .filter(|p| !p.is_empty())
        .filter(|p| seen.insert(p.as_str().to_string()))
        .cloned()
        .collect()
}
