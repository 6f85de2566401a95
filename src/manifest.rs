//! package.json reading
//!
//! Only the dependency groups are consumed. Group key order is
//! preserved as written in the manifest (IndexMap), and the groups
//! themselves are always visited in the same fixed order:
//! dependencies, devDependencies, peerDependencies,
//! optionalDependencies, bundledDependencies.

use crate::error::ManifestError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Map of package name to declared version specifier
pub type DependencyGroup = IndexMap<String, String>;

/// The dependency groups of a package.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    dependencies: DependencyGroup,

    #[serde(default, rename = "devDependencies")]
    dev_dependencies: DependencyGroup,

    #[serde(default, rename = "peerDependencies")]
    peer_dependencies: DependencyGroup,

    #[serde(default, rename = "optionalDependencies")]
    optional_dependencies: DependencyGroup,

    #[serde(default, rename = "bundledDependencies")]
    bundled_dependencies: DependencyGroup,
}

impl PackageManifest {
    /// Reads and parses the package.json at the given path
    ///
    /// Any failure here is fatal to the run: without a valid manifest
    /// there is nothing to check.
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::not_found(path));
        }

        let content =
            fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;

        serde_json::from_str(&content)
            .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))
    }

    /// Parses manifest content directly (for testing)
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error("package.json", e.to_string()))
    }

    /// The dependency groups with their display labels, in fixed order
    pub fn groups(&self) -> [(&'static str, &DependencyGroup); 5] {
        [
            ("Dependencies", &self.dependencies),
            ("Dev Dependencies", &self.dev_dependencies),
            ("Peer Dependencies", &self.peer_dependencies),
            ("Optional Dependencies", &self.optional_dependencies),
            ("Bundled Dependencies", &self.bundled_dependencies),
        ]
    }

    /// Total number of declared dependencies across all groups
    pub fn total_dependencies(&self) -> usize {
        self.groups().iter().map(|(_, group)| group.len()).sum()
    }
}
