//! Report output stage.
//!
//! Resolves where a comparison report goes and in which format, then
//! renders and writes it.

use crate::compare::Comparison;
use crate::config::{CompareConfig, OutputConfig};
use crate::model::ApiBaseline;
use crate::reports::{create_reporter_with_options, ReportConfig, ReportFormat, ReportMetadata};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

use super::PipelineError;

/// A resolved report destination: concrete format, colour and target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDestination {
    /// `None` writes to stdout
    pub file: Option<PathBuf>,
    /// Never `Auto`
    pub format: ReportFormat,
    pub color: bool,
}

impl ReportDestination {
    /// Resolve against the current stdout and `NO_COLOR`.
    #[must_use]
    pub fn from_config(output: &OutputConfig) -> Self {
        let interactive = output.file.is_none() && std::io::stdout().is_terminal();
        let no_color = output.no_color || std::env::var_os("NO_COLOR").is_some();
        Self::resolve(output, interactive, no_color)
    }

    /// `Auto` becomes a summary on an interactive stdout and the JSON delta
    /// tree everywhere else. Only an interactive summary is coloured.
    #[must_use]
    pub fn resolve(output: &OutputConfig, interactive: bool, no_color: bool) -> Self {
        let format = match output.format {
            ReportFormat::Auto if interactive => ReportFormat::Summary,
            ReportFormat::Auto => ReportFormat::Json,
            explicit => explicit,
        };
        Self {
            file: output.file.clone(),
            color: interactive && !no_color && format == ReportFormat::Summary,
            format,
        }
    }

    /// Write a rendered report to the file, or to stdout.
    pub fn write(&self, report: &str) -> Result<()> {
        match &self.file {
            None => {
                println!("{report}");
                Ok(())
            }
            Some(path) => std::fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display())),
        }
    }
}

/// Render a comparison report and write it to the configured destination.
pub fn output_report(
    config: &CompareConfig,
    comparison: &Comparison,
    old: &ApiBaseline,
    new: &ApiBaseline,
) -> Result<()> {
    let destination = ReportDestination::from_config(&config.output);

    let report_config = ReportConfig {
        only_breaking: config.filtering.only_breaking,
        metadata: ReportMetadata {
            old_path: Some(config.paths.old.to_string_lossy().to_string()),
            new_path: Some(config.paths.new.to_string_lossy().to_string()),
            old_name: (!old.name.is_empty()).then(|| old.name.clone()),
            new_name: (!new.name.is_empty()).then(|| new.name.clone()),
        },
    };

    let reporter = create_reporter_with_options(destination.format, destination.color);
    let report = reporter
        .generate_report(comparison, &report_config)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    destination.write(&report)?;
    if let Some(path) = destination.file.as_ref().filter(|_| !config.behavior.quiet) {
        tracing::info!(
            "{} report with {} leaf deltas written to {}",
            destination.format,
            comparison.outcome.leaves().len(),
            path.display()
        );
    }
    Ok(())
}
