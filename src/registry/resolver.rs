//! Latest-version resolution with caching
//!
//! The resolver consults the in-process cache first and issues at most
//! one registry lookup per package per run. It never returns an error:
//! registry failures collapse into typed outcomes that the checker
//! turns into records and non-fatal warnings.

use crate::error::RegistryError;
use crate::registry::{PackageRegistry, VersionCache};

/// Outcome of one latest-version lookup
#[derive(Debug)]
pub enum Resolution {
    /// The registry (or cache) produced a latest version
    Latest(String),
    /// The package does not exist on the registry
    NotFound,
    /// The registry refused the request due to rate limiting
    RateLimited,
    /// Transport or response failure
    Failed(RegistryError),
}

impl Resolution {
    /// The resolved version, when there is one
    pub fn version(&self) -> Option<&str> {
        match self {
            Resolution::Latest(version) => Some(version),
            _ => None,
        }
    }

    /// A user-facing warning for failure outcomes
    ///
    /// Not-found produces no warning here: it surfaces as a dedicated
    /// status in the report instead.
    pub fn warning(&self, package: &str) -> Option<String> {
        match self {
            Resolution::Latest(_) | Resolution::NotFound => None,
            Resolution::RateLimited => Some(format!(
                "rate limited by the npm registry for '{}'",
                package
            )),
            Resolution::Failed(err) => Some(err.to_string()),
        }
    }
}

/// Cache-first resolver over a package registry
pub struct Resolver {
    registry: Box<dyn PackageRegistry>,
    cache: VersionCache,
}

impl Resolver {
    /// Creates a resolver with a fresh cache
    pub fn new(registry: Box<dyn PackageRegistry>) -> Self {
        Self {
            registry,
            cache: VersionCache::new(),
        }
    }

    /// Resolves the latest version for one package
    ///
    /// Cache hits return immediately without registry traffic. A
    /// successful lookup populates the cache; not-found is NOT cached
    /// so a later publish is picked up by a fresh run.
    pub async fn resolve_latest(&self, package: &str) -> Resolution {
        if let Some(version) = self.cache.get(package) {
            return Resolution::Latest(version);
        }

        match self.registry.latest_version(package).await {
            Ok(version) => {
                self.cache.set(package, &version);
                Resolution::Latest(version)
            }
            Err(RegistryError::PackageNotFound { .. }) => Resolution::NotFound,
            Err(RegistryError::RateLimitExceeded { .. }) => Resolution::RateLimited,
            Err(err) => Resolution::Failed(err),
        }
    }
}
