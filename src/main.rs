//! pkgpulse - npm dependency update checker CLI
//!
//! Reads package.json in the target directory, resolves the latest
//! version of every declared dependency against the npm registry,
//! prints a classified report with a summary, and offers to install
//! the outdated set through the detected package manager.

use clap::Parser;
use pkgpulse::checker::DependencyChecker;
use pkgpulse::cli::CliArgs;
use pkgpulse::config::SkipConfig;
use pkgpulse::domain::CheckSummary;
use pkgpulse::manifest::PackageManifest;
use pkgpulse::package_manager::{
    detect_package_manager, PackageManagerRunner, SystemPackageManager,
};
use pkgpulse::progress::{NullProgress, ProgressSink, SpinnerProgress};
use pkgpulse::prompt;
use pkgpulse::registry::{HttpClient, NpmRegistry, Resolver};
use pkgpulse::render::TextReport;
use pkgpulse::selfcheck;
use pkgpulse::skip::SkipMatcher;
use pkgpulse::update::categorize;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("pkgpulse v{}", selfcheck::CURRENT_VERSION);
        eprintln!("Target: {}", args.path.display());
    }

    // Merge skip rules from the config file and CLI flags
    let skip_config = SkipConfig::load(&args.path, &args.skip);
    let report = TextReport::new();
    let mut stdout = io::stdout().lock();

    if let Some(warning) = &skip_config.warning {
        report.write_warning(warning, &mut stdout)?;
    }
    if args.verbose && !skip_config.patterns.is_empty() {
        eprintln!("Skip rules: {}", skip_config.patterns.join(", "));
    }

    // A missing or broken manifest is the one fatal failure
    let manifest = PackageManifest::read(&args.path.join("package.json"))?;

    let client = HttpClient::new()?;
    let resolver = Arc::new(Resolver::new(Box::new(NpmRegistry::new(client))));
    let checker = DependencyChecker::new(
        Arc::clone(&resolver),
        SkipMatcher::new(&skip_config.patterns),
    );

    let progress: Arc<dyn ProgressSink> = if args.quiet {
        Arc::new(NullProgress)
    } else {
        Arc::new(SpinnerProgress::new())
    };

    let mut all_records = Vec::new();
    for (label, group) in manifest.groups() {
        let category = checker.check(group, label, Arc::clone(&progress)).await;
        if category.records.is_empty() {
            continue;
        }
        if !args.quiet {
            report.write_category(&category, &mut stdout)?;
        }
        all_records.extend(category.records);
    }

    let summary = CheckSummary::from_records(&all_records);
    report.write_summary(&summary, &mut stdout)?;

    if !args.no_self_check {
        if let Some(latest) = selfcheck::check_for_update(&resolver).await {
            report.write_update_available(selfcheck::CURRENT_VERSION, &latest, &mut stdout)?;
        }
    }

    // Offer the upgrade prompt when something is upgradeable
    if !args.no_prompt && !args.quiet && summary.has_outdated() {
        let buckets = categorize(&all_records);
        if !buckets.is_empty() {
            writeln!(stdout)?;
            stdout.flush()?;
            drop(stdout);

            if let Some(choice) = prompt::run_prompt(&buckets)? {
                let updates = buckets.for_choice(choice);
                let kind = detect_package_manager(&args.path);
                println!(
                    "Updating {} dependencies using {}...",
                    updates.len(),
                    kind
                );

                let runner = SystemPackageManager::new();
                let outcome = runner.run_install(kind, updates, &args.path);
                if outcome.success {
                    println!("Updated {} dependencies", updates.len());
                } else {
                    eprintln!("Install failed: {}", outcome.command);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    // Individual lookup failures never affect the exit status; the
    // run succeeded once classification completed
    Ok(ExitCode::SUCCESS)
}
