//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable listing of every diagnosed change.

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::compare::Comparison;
use crate::delta::Delta;
use crate::error::Result;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn leaf_line(&self, delta: &Delta) -> String {
        let marker = if delta.is_compatible() {
            self.color("compatible", "green")
        } else {
            self.color("BREAKING  ", "red")
        };
        let subject = if delta.arguments.is_empty() {
            delta.key.clone()
        } else {
            delta.arguments.join(" ")
        };
        format!(
            "  {marker} {} {} {}  {}",
            delta.element_type,
            delta.kind,
            delta.flag,
            self.color(&subject, "dim")
        )
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_report(&self, comparison: &Comparison, config: &ReportConfig) -> Result<String> {
        let mut lines = Vec::new();

        lines.push(self.color("API Compatibility Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let old_name = config
            .metadata
            .old_name
            .as_deref()
            .or(config.metadata.old_path.as_deref())
            .unwrap_or("old");
        let new_name = config
            .metadata
            .new_name
            .as_deref()
            .or(config.metadata.new_path.as_deref())
            .unwrap_or("new");
        lines.push(format!(
            "{}  {} → {}",
            self.color("Baselines:", "cyan"),
            old_name,
            new_name
        ));

        let leaves = comparison.outcome.leaves();
        let breaking = leaves.iter().filter(|d| !d.is_compatible()).count();
        lines.push(format!(
            "{}  {} total, {} breaking",
            self.color("Changes:", "cyan"),
            leaves.len(),
            if breaking > 0 {
                self.color(&breaking.to_string(), "red")
            } else {
                self.color("0", "green")
            }
        ));
        lines.push(String::new());

        for leaf in leaves
            .iter()
            .filter(|d| !config.only_breaking || !d.is_compatible())
        {
            lines.push(self.leaf_line(leaf));
        }

        if !comparison.status.is_ok() {
            lines.push(String::new());
            lines.push(self.color("Resolution issues:", "yellow"));
            for issue in comparison.status.issues() {
                lines.push(format!("  {issue}"));
            }
        }

        lines.push(String::new());
        let verdict = if comparison.outcome.is_no_delta() {
            self.color("No API changes", "green")
        } else if breaking == 0 {
            self.color("Compatible", "green")
        } else {
            self.color("Breaking changes detected", "red")
        };
        lines.push(verdict);

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
