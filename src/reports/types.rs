//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: summary if interactive, JSON otherwise
    #[default]
    Auto,
    /// Structured JSON delta tree
    Json,
    /// Brief summary output
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Where the compared baselines came from.
#[derive(Debug, Clone, Default)]
pub struct ReportMetadata {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub old_name: Option<String>,
    pub new_name: Option<String>,
}

/// Options shared by every reporter.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Only list breaking leaves
    pub only_breaking: bool,
    pub metadata: ReportMetadata,
}
