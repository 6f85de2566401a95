//! Package manager integration for installing selected updates
//!
//! This module provides:
//! - Detection of the project's package manager by lockfile
//! - Construction of the install command for a set of updates
//! - Execution behind a trait so tests never spawn real processes

use crate::update::UpdateOption;
use std::fmt;
use std::path::Path;
use std::process::Command;

/// Supported Node.js package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManagerKind {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManagerKind {
    /// The executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Pnpm => "pnpm",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Bun => "bun",
        }
    }

    /// Lockfiles that identify this package manager
    pub fn lockfiles(&self) -> &'static [&'static str] {
        match self {
            PackageManagerKind::Npm => &["package-lock.json"],
            PackageManagerKind::Pnpm => &["pnpm-lock.yaml"],
            PackageManagerKind::Yarn => &["yarn.lock"],
            PackageManagerKind::Bun => &["bun.lock", "bun.lockb"],
        }
    }

    /// Builds the full argument list for installing the given updates
    ///
    /// npm pins versions with --save-exact; the others use `add` with
    /// explicit `name@version` pairs.
    pub fn install_args(&self, updates: &[UpdateOption]) -> Vec<String> {
        let mut args: Vec<String> = match self {
            PackageManagerKind::Npm => vec!["install".to_string(), "--save-exact".to_string()],
            PackageManagerKind::Pnpm | PackageManagerKind::Yarn | PackageManagerKind::Bun => {
                vec!["add".to_string()]
            }
        };
        args.extend(updates.iter().map(UpdateOption::spec));
        args
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// All managers in detection order
const DETECTION_ORDER: [PackageManagerKind; 4] = [
    PackageManagerKind::Npm,
    PackageManagerKind::Pnpm,
    PackageManagerKind::Yarn,
    PackageManagerKind::Bun,
];

/// Detects the package manager by lockfile presence, defaulting to npm
pub fn detect_package_manager(dir: &Path) -> PackageManagerKind {
    for kind in DETECTION_ORDER {
        if kind.lockfiles().iter().any(|lock| dir.join(lock).exists()) {
            return kind;
        }
    }
    PackageManagerKind::Npm
}

/// Result of running an install command
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// The full command line that was executed
    pub command: String,
    /// Whether the command exited successfully
    pub success: bool,
}

/// Trait for running package manager install commands
pub trait PackageManagerRunner {
    /// Installs the given updates in the working directory
    fn run_install(
        &self,
        kind: PackageManagerKind,
        updates: &[UpdateOption],
        working_dir: &Path,
    ) -> InstallOutcome;
}

/// Runner that executes real commands with inherited stdio
#[derive(Debug, Default)]
pub struct SystemPackageManager;

impl SystemPackageManager {
    /// Create a new system package manager runner
    pub fn new() -> Self {
        Self
    }
}

impl PackageManagerRunner for SystemPackageManager {
    fn run_install(
        &self,
        kind: PackageManagerKind,
        updates: &[UpdateOption],
        working_dir: &Path,
    ) -> InstallOutcome {
        let args = kind.install_args(updates);
        let command = format!("{} {}", kind.program(), args.join(" "));

        let status = Command::new(kind.program())
            .args(&args)
            .current_dir(working_dir)
            .status();

        InstallOutcome {
            command,
            success: status.map(|s| s.success()).unwrap_or(false),
        }
    }
}
