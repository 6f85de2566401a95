//! Text rendering for check results
//!
//! The classification core hands over plain records, warnings, and
//! summary counts; everything terminal-related (colors, layout)
//! lives here. Writers are injected so tests can capture output.

use crate::checker::CategoryReport;
use crate::domain::{CheckSummary, DependencyRecord, RecordStatus, UpdateType};
use colored::Colorize;
use std::io::Write;

/// Text report writer
pub struct TextReport {
    /// Disable colors (plain labels) for tests and dumb terminals
    color: bool,
}

impl TextReport {
    /// Creates a report writer with colors enabled
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Creates a report writer with explicit color control
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Writes one category block: heading, records, warnings
    pub fn write_category(
        &self,
        report: &CategoryReport,
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        if report.records.is_empty() {
            return Ok(());
        }

        if self.color {
            writeln!(out, "{}", format!("{}:", report.category).cyan().bold())?;
            writeln!(out, "{}", "─".repeat(report.category.len() + 1).cyan())?;
        } else {
            writeln!(out, "{}:", report.category)?;
            writeln!(out, "{}", "─".repeat(report.category.len() + 1))?;
        }

        for record in &report.records {
            self.write_record(record, out)?;
        }

        for warning in &report.warnings {
            self.write_warning(warning, out)?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Writes a single non-fatal warning line
    pub fn write_warning(&self, warning: &str, out: &mut dyn Write) -> std::io::Result<()> {
        if self.color {
            writeln!(out, "{} {}", "⚠".yellow(), warning.yellow())
        } else {
            writeln!(out, "warning: {}", warning)
        }
    }

    fn write_record(&self, record: &DependencyRecord, out: &mut dyn Write) -> std::io::Result<()> {
        let (status, version_info) = self.status_cell(record);
        if self.color {
            writeln!(
                out,
                "{} {} {}",
                status,
                record.name.white(),
                version_info.dimmed()
            )
        } else {
            writeln!(out, "{} {} {}", status, record.name, version_info)
        }
    }

    /// Status label plus version detail for one record
    fn status_cell(&self, record: &DependencyRecord) -> (String, String) {
        match record.status() {
            RecordStatus::Skipped => (
                self.paint("SKIPPED", |s| s.dimmed().to_string()),
                record.current_version.clone(),
            ),
            RecordStatus::Unknown => (
                self.paint("NOT FOUND", |s| s.red().to_string()),
                format!("{} (not found on npm registry)", record.current_version),
            ),
            RecordStatus::LatestTag => {
                let latest = record.latest_version.as_deref().unwrap_or_default();
                (
                    self.paint("LATEST TAG", |s| s.cyan().to_string()),
                    format!(
                        "{} → {} (actual latest version)",
                        record.current_version, latest
                    ),
                )
            }
            RecordStatus::Outdated(update_type) => {
                let latest = record.latest_version.as_deref().unwrap_or_default();
                let label = match update_type {
                    UpdateType::Major => self.paint("MAJOR", |s| s.yellow().to_string()),
                    UpdateType::Minor => self.paint("MINOR", |s| s.magenta().to_string()),
                    UpdateType::Patch => self.paint("PATCH", |s| s.blue().to_string()),
                };
                (
                    label,
                    format!("{} → {}", record.current_version, latest),
                )
            }
            RecordStatus::UpToDate => (
                self.paint("UP TO DATE", |s| s.green().to_string()),
                record.current_version.clone(),
            ),
        }
    }

    fn paint(&self, label: &str, painter: impl Fn(&str) -> String) -> String {
        if self.color {
            painter(label)
        } else {
            label.to_string()
        }
    }

    /// Writes the summary block with category counts
    pub fn write_summary(
        &self,
        summary: &CheckSummary,
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        let rule = "═".repeat(60);
        let heading = format!("Summary ({} packages)", summary.total);

        if self.color {
            writeln!(out, "{}", rule.dimmed())?;
            writeln!(out, "{}", heading.cyan().bold())?;
            writeln!(out, "{}", rule.dimmed())?;
        } else {
            writeln!(out, "{}", rule)?;
            writeln!(out, "{}", heading)?;
            writeln!(out, "{}", rule)?;
        }

        if summary.up_to_date > 0 {
            let label = self.paint("✓ Up to date:", |s| s.green().to_string());
            writeln!(out, "  {} {}", label, summary.up_to_date)?;
        }

        if summary.outdated > 0 {
            let mut breakdown = Vec::new();
            if summary.major > 0 {
                breakdown.push(format!("{} major", summary.major));
            }
            if summary.minor > 0 {
                breakdown.push(format!("{} minor", summary.minor));
            }
            if summary.patch > 0 {
                breakdown.push(format!("{} patch", summary.patch));
            }
            let label = self.paint("⚠ Outdated:", |s| s.blue().to_string());
            if breakdown.is_empty() {
                writeln!(out, "  {} {}", label, summary.outdated)?;
            } else {
                let detail = format!("({})", breakdown.join(", "));
                let detail = self.paint(&detail, |s| s.dimmed().to_string());
                writeln!(out, "  {} {} {}", label, summary.outdated, detail)?;
            }
        }

        if summary.unknown > 0 {
            let label = self.paint("? Unknown:", |s| s.magenta().to_string());
            writeln!(out, "  {} {}", label, summary.unknown)?;
        }

        if summary.skipped > 0 {
            let label = self.paint("⏭ Skipped:", |s| s.dimmed().to_string());
            writeln!(out, "  {} {}", label, summary.skipped)?;
        }

        if self.color {
            writeln!(out, "{}", rule.dimmed())?;
        } else {
            writeln!(out, "{}", rule)?;
        }
        Ok(())
    }

    /// Writes the self-update banner
    pub fn write_update_available(
        &self,
        current: &str,
        latest: &str,
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(out)?;
        if self.color {
            writeln!(out, "{}", "Update available!".yellow().bold())?;
            writeln!(
                out,
                "{}",
                format!("Current: {} → Latest: {}", current, latest).dimmed()
            )?;
            writeln!(
                out,
                "{}",
                "Run: npm install -g pkgpulse@latest".cyan().underline()
            )?;
        } else {
            writeln!(out, "Update available!")?;
            writeln!(out, "Current: {} → Latest: {}", current, latest)?;
            writeln!(out, "Run: npm install -g pkgpulse@latest")?;
        }
        writeln!(out)
    }
}

impl Default for TextReport {
    fn default() -> Self {
        Self::new()
    }
}
