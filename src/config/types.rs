//! Configuration types for apidiff operations.
//!
//! Provides structured configuration for comparison runs.

use crate::error::{ApiDiffError, Result};
use crate::model::VisibilityMask;
use crate::reports::ReportFormat;
use clap::ValueEnum;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// This is the top-level configuration struct that aggregates all configuration
/// options. It can be constructed from CLI arguments, config files, or both
/// (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// What gets compared (visibility, components)
    pub comparison: ComparisonConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Filtering options
    pub filtering: FilterConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the visibility levels to compare.
    pub const fn visibility(mut self, visibility: VisibilityFilter) -> Self {
        self.config.comparison.visibility = visibility;
        self
    }

    /// Restrict the comparison to one component; may be repeated.
    pub fn component(mut self, id: impl Into<String>) -> Self {
        self.config.comparison.components.push(id.into());
        self
    }

    /// Exclude types whose qualified name matches the pattern.
    pub fn exclude_type(mut self, pattern: impl Into<String>) -> Self {
        self.config.filtering.exclude_types.push(pattern.into());
        self
    }

    /// Only report breaking changes.
    pub const fn only_breaking(mut self, only: bool) -> Self {
        self.config.filtering.only_breaking = only;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-breaking mode.
    pub const fn fail_on_breaking(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_breaking = fail;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Configuration for compare operations
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Baseline snapshots to compare
    pub paths: ComparePaths,
    pub comparison: ComparisonConfig,
    pub output: OutputConfig,
    pub filtering: FilterConfig,
    pub behavior: BehaviorConfig,
}

impl CompareConfig {
    /// Combine the paths with an application configuration.
    #[must_use]
    pub fn from_app(paths: ComparePaths, config: AppConfig) -> Self {
        Self {
            paths,
            comparison: config.comparison,
            output: config.output,
            filtering: config.filtering,
            behavior: config.behavior,
        }
    }
}

/// Paths for compare operation
#[derive(Debug, Clone)]
pub struct ComparePaths {
    /// Path to the old baseline snapshot
    pub old: PathBuf,
    /// Path to the new baseline snapshot
    pub new: PathBuf,
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Which API visibility levels take part in a comparison.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityFilter {
    /// Publicly supported API only
    #[default]
    Api,
    /// API and service provider interfaces
    ApiSpi,
    /// Every type, including internal ones
    All,
}

impl From<VisibilityFilter> for VisibilityMask {
    fn from(filter: VisibilityFilter) -> Self {
        match filter {
            VisibilityFilter::Api => Self::API,
            VisibilityFilter::ApiSpi => Self::API_SPI,
            VisibilityFilter::All => Self::ALL,
        }
    }
}

impl std::fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::ApiSpi => write!(f, "api-spi"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Comparison scope configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Visibility levels to compare: api, api-spi, all
    pub visibility: VisibilityFilter,
    /// Component ids to compare (empty compares every non-system component)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Filtering configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterConfig {
    /// Regular expressions; matching type names are not compared
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_types: Vec<String>,
    /// Only report breaking changes
    pub only_breaking: bool,
}

impl FilterConfig {
    /// Compile the type exclusion patterns.
    pub fn exclusion_patterns(&self) -> Result<Vec<Regex>> {
        self.exclude_types
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    ApiDiffError::config(format!("invalid exclusion pattern '{pattern}': {e}"))
                })
            })
            .collect()
    }
}

/// Behavior configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct BehaviorConfig {
    /// Exit with code 2 if breaking changes are found
    pub fail_on_breaking: bool,
    /// Exit with code 1 if any change is found
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}
