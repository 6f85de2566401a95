//! Self-update check
//!
//! Resolves the tool's own registry entry (the long-TTL cache key)
//! and reports a strictly newer release. Every failure is silent: the
//! banner is a courtesy, never a reason to degrade a check run.

use crate::domain::{is_outdated, VersionTriple};
use crate::registry::{Resolver, SELF_PACKAGE};

/// The version compiled into this binary
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the newer released version, if there is one
pub async fn check_for_update(resolver: &Resolver) -> Option<String> {
    let latest = resolver.resolve_latest(SELF_PACKAGE).await;
    let latest = latest.version()?;
    newer_release(CURRENT_VERSION, latest).map(str::to_string)
}

/// Strictly-newer comparison so a registry rollback never advertises
/// a downgrade
fn newer_release<'a>(current: &str, latest: &'a str) -> Option<&'a str> {
    let current = VersionTriple::parse(current).ok()?;
    let released = VersionTriple::parse(latest).ok()?;
    is_outdated(current, released).then_some(latest)
}
