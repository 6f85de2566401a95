//! npm registry access
//!
//! This module provides:
//! - HTTP client shared foundation
//! - npm registry lookup (dist-tags.latest)
//! - Time-bounded in-process version cache
//! - Cache-first resolver with typed, non-throwing outcomes

mod cache;
mod client;
mod npm;
mod resolver;

pub use cache::{VersionCache, SELF_PACKAGE};
pub use client::HttpClient;
pub use npm::NpmRegistry;
pub use resolver::{Resolution, Resolver};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for latest-version lookups against a package registry
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Fetch the latest version tag for a package
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError>;
}
