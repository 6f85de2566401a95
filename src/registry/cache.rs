//! In-process cache for resolved latest versions
//!
//! Entries live for the lifetime of one invocation. Ordinary packages
//! get a short TTL; the tool's own registry entry gets a much longer
//! one, since the self-update check happens once per invocation burst
//! while dependency lookups repeat within the same burst. Expired
//! entries are not purged, just treated as absent and overwritten by
//! the next `set`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// The tool's own distribution name on the registry
pub const SELF_PACKAGE: &str = "pkgpulse";

/// TTL for ordinary package entries (5 minutes)
const PACKAGE_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL for the tool's own entry (1 hour)
const SELF_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    version: String,
    stored_at: Instant,
}

/// Time-bounded map of package name to latest resolved version
///
/// Mutex-guarded so lookups running on a multi-threaded runtime can
/// share one instance.
#[derive(Debug, Default)]
pub struct VersionCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl VersionCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached version for a package if the entry is still
    /// fresh
    pub fn get(&self, package: &str) -> Option<String> {
        self.get_at(package, Instant::now())
    }

    /// Stores the latest version for a package
    pub fn set(&self, package: &str, version: &str) {
        self.set_at(package, version, Instant::now());
    }

    fn ttl_for(package: &str) -> Duration {
        if package == SELF_PACKAGE {
            SELF_TTL
        } else {
            PACKAGE_TTL
        }
    }

    fn get_at(&self, package: &str, now: Instant) -> Option<String> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        let entry = entries.get(package)?;
        if now.duration_since(entry.stored_at) < Self::ttl_for(package) {
            Some(entry.version.clone())
        } else {
            None
        }
    }

    fn set_at(&self, package: &str, version: &str, now: Instant) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            package.to_string(),
            CacheEntry {
                version: version.to_string(),
                stored_at: now,
            },
        );
    }
}
