//! Pipeline orchestration for comparison runs.
//!
//! This module provides the shared load → compare → report workflow used by
//! the CLI command handlers.

mod compare_stage;
mod load;
mod report_stage;

pub use compare_stage::{build_comparator, run_comparison};
pub use load::{load_baseline, load_baseline_str, SnapshotFormat};
pub use report_stage::{output_report, ReportDestination};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse a baseline snapshot
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// A requested component is missing from a baseline
    #[error("Component '{component}' not found in {side} baseline")]
    ComponentMissing { component: String, side: String },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or no fail mode requested)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// Binary incompatible changes were detected
    pub const BREAKING_CHANGES: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
