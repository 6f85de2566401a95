//! Integration tests for pkgpulse
//!
//! These tests drive the checker pipeline end-to-end against a mock
//! registry: classification outcomes, batch ordering under latency
//! variance, skip behavior, and summary aggregation. No network.

use async_trait::async_trait;
use indexmap::IndexMap;
use pkgpulse::checker::DependencyChecker;
use pkgpulse::config::SkipConfig;
use pkgpulse::domain::{CheckSummary, UpdateType};
use pkgpulse::error::RegistryError;
use pkgpulse::progress::NullProgress;
use pkgpulse::registry::{PackageRegistry, Resolver};
use pkgpulse::skip::SkipMatcher;
use pkgpulse::update::categorize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock registry with canned versions, an invocation log, and
/// per-package artificial latency
struct MockRegistry {
    versions: HashMap<String, String>,
    queried: Arc<Mutex<Vec<String>>>,
    latency: fn(&str) -> Duration,
}

impl MockRegistry {
    fn new(versions: &[(&str, &str)]) -> Self {
        Self {
            versions: versions
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            queried: Arc::new(Mutex::new(Vec::new())),
            latency: |_| Duration::ZERO,
        }
    }

    fn with_latency(mut self, latency: fn(&str) -> Duration) -> Self {
        self.latency = latency;
        self
    }

    fn query_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.queried)
    }
}

#[async_trait]
impl PackageRegistry for MockRegistry {
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        self.queried.lock().unwrap().push(package.to_string());
        let delay = (self.latency)(package);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.versions
            .get(package)
            .cloned()
            .ok_or_else(|| RegistryError::package_not_found(package))
    }
}

fn deps(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn checker_over(registry: MockRegistry, skip: SkipMatcher) -> DependencyChecker {
    DependencyChecker::new(Arc::new(Resolver::new(Box::new(registry))), skip)
}

mod end_to_end {
    use super::*;

    /// The full scenario: one patch-outdated, one up-to-date, one
    /// skipped package; the skipped package is never queried
    #[tokio::test]
    async fn test_check_classify_and_summarize() {
        let registry = MockRegistry::new(&[("lodash", "4.17.21"), ("chalk", "5.0.0")]);
        let log = registry.query_log();
        let checker = checker_over(registry, SkipMatcher::new(["@types/*"]));

        let report = checker
            .check(
                &deps(&[
                    ("lodash", "4.17.0"),
                    ("chalk", "5.0.0"),
                    ("@types/node", "18.0.0"),
                ]),
                "Dependencies",
                Arc::new(NullProgress),
            )
            .await;

        assert_eq!(report.records.len(), 3);

        let lodash = &report.records[0];
        assert!(lodash.is_outdated);
        assert_eq!(lodash.update_type, Some(UpdateType::Patch));
        assert_eq!(lodash.latest_version.as_deref(), Some("4.17.21"));

        let chalk = &report.records[1];
        assert!(chalk.is_up_to_date());

        let types_node = &report.records[2];
        assert!(types_node.is_skipped);

        let summary = CheckSummary::from_records(&report.records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.up_to_date, 1);
        assert_eq!(summary.outdated, 1);
        assert_eq!(summary.patch, 1);
        assert_eq!(summary.major, 0);
        assert_eq!(summary.minor, 0);
        assert_eq!(summary.unknown, 0);
        assert_eq!(summary.skipped, 1);

        // the skipped package never generated registry traffic
        let queried = log.lock().unwrap();
        assert!(queried.contains(&"lodash".to_string()));
        assert!(queried.contains(&"chalk".to_string()));
        assert!(!queried.contains(&"@types/node".to_string()));
    }

    /// Classified records feed the upgrade buckets
    #[tokio::test]
    async fn test_records_feed_update_buckets() {
        let registry = MockRegistry::new(&[
            ("patch-pkg", "1.0.1"),
            ("minor-pkg", "1.1.0"),
            ("major-pkg", "2.0.0"),
            ("current-pkg", "1.0.0"),
        ]);
        let checker = checker_over(registry, SkipMatcher::empty());

        let report = checker
            .check(
                &deps(&[
                    ("patch-pkg", "1.0.0"),
                    ("minor-pkg", "1.0.0"),
                    ("major-pkg", "1.0.0"),
                    ("current-pkg", "1.0.0"),
                ]),
                "Dependencies",
                Arc::new(NullProgress),
            )
            .await;

        let buckets = categorize(&report.records);
        assert_eq!(buckets.patch.len(), 1);
        assert_eq!(buckets.minor.len(), 1);
        assert_eq!(buckets.all.len(), 3);
        assert_eq!(buckets.major_count(), 1);
        assert_eq!(buckets.all[0].spec(), "patch-pkg@1.0.1");
    }
}

mod batch_ordering {
    use super::*;

    /// 25 packages across 3 batches with adversarial latency: output
    /// order still equals the input key order
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_order_independent_of_latency() {
        let entries: Vec<(String, String)> = (0..25)
            .map(|i| (format!("pkg-{:02}", i), "1.0.0".to_string()))
            .collect();
        let versions: Vec<(&str, &str)> = entries
            .iter()
            .map(|(name, _)| (name.as_str(), "2.0.0"))
            .collect();

        // earlier packages respond slower than later ones
        let registry = MockRegistry::new(&versions).with_latency(|name| {
            let index: u64 = name
                .trim_start_matches("pkg-")
                .parse()
                .unwrap_or_default();
            Duration::from_millis((25 - index) * 3)
        });
        let checker = checker_over(registry, SkipMatcher::empty());

        let dependencies: IndexMap<String, String> = entries.iter().cloned().collect();
        let report = checker
            .check(&dependencies, "Dependencies", Arc::new(NullProgress))
            .await;

        let output: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
        let input: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(output, input);
    }

    /// Batches run sequentially: the first ten lookups all start
    /// before any of the second ten
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_batches_are_sequential() {
        let entries: Vec<(String, String)> = (0..20)
            .map(|i| (format!("pkg-{:02}", i), "1.0.0".to_string()))
            .collect();
        let versions: Vec<(&str, &str)> = entries
            .iter()
            .map(|(name, _)| (name.as_str(), "1.0.0"))
            .collect();

        let registry =
            MockRegistry::new(&versions).with_latency(|_| Duration::from_millis(5));
        let log = registry.query_log();
        let checker = checker_over(registry, SkipMatcher::empty());

        let dependencies: IndexMap<String, String> = entries.iter().cloned().collect();
        checker
            .check(&dependencies, "Dependencies", Arc::new(NullProgress))
            .await;

        let queried = log.lock().unwrap();
        assert_eq!(queried.len(), 20);
        // every first-batch package was queried before every
        // second-batch package
        let first_batch: Vec<usize> = queried
            .iter()
            .take(10)
            .map(|name| name.trim_start_matches("pkg-").parse().unwrap())
            .collect();
        assert!(first_batch.iter().all(|&i| i < 10));
    }
}

mod skip_rules {
    use super::*;

    #[tokio::test]
    async fn test_config_file_and_cli_rules_merge() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("pkgpulse.config.json"),
            r#"{"skip": ["lodash"]}"#,
        )
        .unwrap();

        let config = SkipConfig::load(dir.path(), &["@types/*".to_string()]);
        assert_eq!(config.patterns, vec!["lodash", "@types/*"]);

        let registry = MockRegistry::new(&[("chalk", "5.0.0")]);
        let log = registry.query_log();
        let checker = checker_over(registry, SkipMatcher::new(&config.patterns));

        let report = checker
            .check(
                &deps(&[
                    ("lodash", "4.17.0"),
                    ("@types/node", "18.0.0"),
                    ("chalk", "5.0.0"),
                ]),
                "Dependencies",
                Arc::new(NullProgress),
            )
            .await;

        assert!(report.records[0].is_skipped);
        assert!(report.records[1].is_skipped);
        assert!(report.records[2].is_up_to_date());
        assert_eq!(log.lock().unwrap().as_slice(), ["chalk"]);
    }

    #[tokio::test]
    async fn test_malformed_regex_rule_never_aborts() {
        let registry = MockRegistry::new(&[("lodash", "4.17.21")]);
        let checker = checker_over(registry, SkipMatcher::new(["[broken-rule"]));

        let report = checker
            .check(
                &deps(&[("lodash", "4.17.0")]),
                "Dependencies",
                Arc::new(NullProgress),
            )
            .await;

        // the rule degraded to substring matching and matched nothing
        assert!(!report.records[0].is_skipped);
        assert!(report.records[0].is_outdated);
    }
}

mod failure_isolation {
    use super::*;

    /// One package failing never prevents the others from resolving
    #[tokio::test]
    async fn test_partial_failures_do_not_abort() {
        struct FlakyRegistry;

        #[async_trait]
        impl PackageRegistry for FlakyRegistry {
            async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
                match package {
                    "good-pkg" => Ok("2.0.0".to_string()),
                    "missing-pkg" => Err(RegistryError::package_not_found(package)),
                    "limited-pkg" => Err(RegistryError::rate_limit_exceeded(package)),
                    _ => Err(RegistryError::network_error(package, "connection reset")),
                }
            }
        }

        let checker = DependencyChecker::new(
            Arc::new(Resolver::new(Box::new(FlakyRegistry))),
            SkipMatcher::empty(),
        );

        let report = checker
            .check(
                &deps(&[
                    ("good-pkg", "1.0.0"),
                    ("missing-pkg", "1.0.0"),
                    ("limited-pkg", "1.0.0"),
                    ("broken-pkg", "1.0.0"),
                ]),
                "Dependencies",
                Arc::new(NullProgress),
            )
            .await;

        assert_eq!(report.records.len(), 4);
        assert!(report.records[0].is_outdated);
        assert!(report.records[1].is_unknown());
        assert!(report.records[2].is_unknown());
        assert!(report.records[3].is_unknown());

        // not-found is a status, not a warning; the other two failures warn
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().any(|w| w.contains("rate limited")));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("connection reset")));

        let summary = CheckSummary::from_records(&report.records);
        assert_eq!(summary.unknown, 3);
        assert_eq!(summary.outdated, 1);
    }

    /// Summary disjointness holds for an arbitrary mixed record set
    #[tokio::test]
    async fn test_summary_disjointness() {
        let registry = MockRegistry::new(&[
            ("a", "2.0.0"),
            ("b", "1.0.0"),
            ("c", "1.5.0"),
        ]);
        let checker = checker_over(registry, SkipMatcher::new(["skip-me", "also-*"]));

        let report = checker
            .check(
                &deps(&[
                    ("a", "1.0.0"),
                    ("b", "1.0.0"),
                    ("c", "1.0.0"),
                    ("gone", "1.0.0"),
                    ("skip-me", "1.0.0"),
                    ("also-skipped", "1.0.0"),
                ]),
                "Dependencies",
                Arc::new(NullProgress),
            )
            .await;

        let summary = CheckSummary::from_records(&report.records);
        let non_skipped = summary.up_to_date + summary.outdated + summary.unknown;
        assert_eq!(non_skipped, report.records.len() - summary.skipped);
        assert_eq!(non_skipped + summary.skipped, summary.total);
    }
}

mod caching {
    use super::*;

    /// The same package declared in two groups resolves once
    #[tokio::test]
    async fn test_cross_category_cache_hit() {
        let registry = MockRegistry::new(&[("lodash", "4.17.21")]);
        let log = registry.query_log();
        let resolver = Arc::new(Resolver::new(Box::new(registry)));
        let checker = DependencyChecker::new(Arc::clone(&resolver), SkipMatcher::empty());

        checker
            .check(
                &deps(&[("lodash", "4.17.0")]),
                "Dependencies",
                Arc::new(NullProgress),
            )
            .await;
        checker
            .check(
                &deps(&[("lodash", "^4.0.0")]),
                "Dev Dependencies",
                Arc::new(NullProgress),
            )
            .await;

        assert_eq!(log.lock().unwrap().len(), 1);
    }
}
