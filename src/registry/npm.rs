//! npm registry lookup
//!
//! Fetches package metadata from the npm registry and extracts the
//! `dist-tags.latest` tag.
//! API endpoint: https://registry.npmjs.org/{package}

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageRegistry};
use async_trait::async_trait;
use serde::Deserialize;

/// npm registry base URL
const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Registry backed by the public npm API
pub struct NpmRegistry {
    client: HttpClient,
    base_url: String,
}

/// npm package metadata response (only the piece we consume)
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags")]
    dist_tags: DistTags,
}

#[derive(Debug, Deserialize)]
struct DistTags {
    latest: Option<String>,
}

impl NpmRegistry {
    /// Create a new npm registry lookup
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: NPM_REGISTRY_URL.to_string(),
        }
    }

    /// Create a lookup against a custom base URL (for testing)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the metadata URL for a package (scoped names included)
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package)
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistry {
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: NpmPackageResponse = self.client.get_json(&url, package).await?;

        response
            .dist_tags
            .latest
            .ok_or_else(|| RegistryError::invalid_response(package, "missing latest dist-tag"))
    }
}
