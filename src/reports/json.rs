//! JSON report generator.

use super::{ReportConfig, ReportFormat, ReportGenerator};
use crate::compare::{Comparison, ResolutionIssue};
use crate::delta::{Delta, DeltaOutcome};
use crate::error::{ApiDiffError, ReportErrorKind, Result};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_report(&self, comparison: &Comparison, config: &ReportConfig) -> Result<String> {
        let leaves = comparison.outcome.leaves();
        let breaking: Vec<&Delta> = leaves.iter().copied().filter(|d| !d.is_compatible()).collect();

        let report = JsonReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "apidiff".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                generated_at: Utc::now().to_rfc3339(),
                old: BaselineInfo {
                    name: config.metadata.old_name.clone(),
                    file_path: config.metadata.old_path.clone(),
                },
                new: BaselineInfo {
                    name: config.metadata.new_name.clone(),
                    file_path: config.metadata.new_path.clone(),
                },
            },
            summary: JsonSummary {
                total_changes: leaves.len(),
                breaking_changes: breaking.len(),
                compatible: breaking.is_empty(),
                resolution_issues: comparison.status.len(),
            },
            breaking: config.only_breaking.then_some(breaking),
            outcome: (!config.only_breaking).then_some(&comparison.outcome),
            issues: comparison.status.issues().iter().collect(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| {
            ApiDiffError::report(
                "serializing JSON report",
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// JSON structures for serialization

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: JsonReportMetadata,
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    breaking: Option<Vec<&'a Delta>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a DeltaOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<&'a ResolutionIssue>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    old: BaselineInfo,
    new: BaselineInfo,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct BaselineInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    total_changes: usize,
    breaking_changes: usize,
    compatible: bool,
    resolution_issues: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ComparisonStatus;
    use crate::delta::{DeltaFlag, DeltaKind, DeltaTree, ElementType};

    fn comparison() -> Comparison {
        let tree = DeltaTree::from(vec![
            Delta::new(ElementType::Class, DeltaKind::Removed, DeltaFlag::Field, "a.A", "f"),
            Delta::new(ElementType::Class, DeltaKind::Added, DeltaFlag::Field, "a.A", "g"),
        ]);
        Comparison::new(DeltaOutcome::from_tree(tree), ComparisonStatus::default())
    }

    #[test]
    fn test_json_report_summary() {
        let report = JsonReporter::new()
            .generate_report(&comparison(), &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["summary"]["total_changes"], 2);
        assert_eq!(value["summary"]["breaking_changes"], 1);
        assert_eq!(value["summary"]["compatible"], false);
        assert!(value.get("outcome").is_some());
        assert!(value.get("issues").is_none());
    }

    #[test]
    fn test_json_report_only_breaking() {
        let config = ReportConfig {
            only_breaking: true,
            ..ReportConfig::default()
        };
        let report = JsonReporter::new()
            .pretty(false)
            .generate_report(&comparison(), &config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["breaking"].as_array().map(Vec::len), Some(1));
        assert!(value.get("outcome").is_none());
    }
}
