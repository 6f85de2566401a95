//! Batch dependency checker
//!
//! Drives classification for one declaration group: packages are
//! processed in fixed-size batches, concurrently within a batch and
//! sequentially across batches, so at most `BATCH_SIZE` registry
//! lookups are in flight at once. Skipped packages never reach the
//! resolver. The output record order always equals the manifest's
//! encounter order, independent of which lookup finishes first.

use crate::domain::{classify, DependencyRecord};
use crate::progress::ProgressSink;
use crate::registry::Resolver;
use crate::skip::SkipMatcher;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Number of packages resolved concurrently within one batch
pub const BATCH_SIZE: usize = 10;

/// Classified records and warnings for one declaration group
#[derive(Debug, Default)]
pub struct CategoryReport {
    /// Group label (e.g. "Dependencies")
    pub category: String,
    /// One record per declared package, in encounter order
    pub records: Vec<DependencyRecord>,
    /// Non-fatal registry warnings collected along the way
    pub warnings: Vec<String>,
}

/// Orchestrates skip matching, resolution, and comparison for a
/// declaration group
pub struct DependencyChecker {
    resolver: Arc<Resolver>,
    skip: SkipMatcher,
}

impl DependencyChecker {
    /// Create a checker over a resolver and compiled skip rules
    pub fn new(resolver: Arc<Resolver>, skip: SkipMatcher) -> Self {
        Self { resolver, skip }
    }

    /// Classify every package in one declaration group
    ///
    /// An empty group returns immediately with no registry traffic and
    /// no progress display.
    pub async fn check(
        &self,
        dependencies: &IndexMap<String, String>,
        category: &str,
        progress: Arc<dyn ProgressSink>,
    ) -> CategoryReport {
        if dependencies.is_empty() {
            return CategoryReport {
                category: category.to_string(),
                ..Default::default()
            };
        }

        let total = dependencies.len();
        progress.begin(total, category);

        let completed = Arc::new(AtomicUsize::new(0));
        let entries: Vec<(String, String)> = dependencies
            .iter()
            .map(|(name, version)| (name.clone(), version.clone()))
            .collect();

        let mut records = Vec::with_capacity(total);
        let mut warnings = Vec::new();

        for batch in entries.chunks(BATCH_SIZE) {
            let handles: Vec<_> = batch
                .iter()
                .cloned()
                .map(|(name, version)| {
                    let resolver = Arc::clone(&self.resolver);
                    let progress = Arc::clone(&progress);
                    let completed = Arc::clone(&completed);
                    let skipped = self.skip.matches(&name);
                    let category = category.to_string();

                    tokio::spawn(async move {
                        let outcome = if skipped {
                            // skip implies no registry traffic at all
                            (DependencyRecord::skipped(&name, &version, &category), None)
                        } else {
                            let resolution = resolver.resolve_latest(&name).await;
                            let warning = resolution.warning(&name);
                            let record = match resolution.version() {
                                Some(latest) => {
                                    let (is_outdated, update_type) = classify(&version, latest);
                                    DependencyRecord::resolved(
                                        &name,
                                        &version,
                                        latest,
                                        is_outdated,
                                        update_type,
                                        &category,
                                    )
                                }
                                None => DependencyRecord::unresolved(&name, &version, &category),
                            };
                            (record, warning)
                        };

                        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        progress.advance(done, total);
                        outcome
                    })
                })
                .collect();

            // awaiting in spawn order keeps records aligned with the
            // manifest's encounter order regardless of completion order
            for handle in handles {
                let (record, warning) = handle.await.expect("checker task panicked");
                records.push(record);
                if let Some(warning) = warning {
                    warnings.push(warning);
                }
            }
        }

        progress.finish();

        CategoryReport {
            category: category.to_string(),
            records,
            warnings,
        }
    }
}
