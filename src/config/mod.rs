//! Configuration module for apidiff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use apidiff::config::{AppConfig, ConfigPreset, VisibilityFilter};
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::ApiSpi);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .visibility(VisibilityFilter::All)
//!     .exclude_type(r"\.internal\.")
//!     .fail_on_breaking(true)
//!     .build();
//!
//! // Load from file
//! use apidiff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.apidiff.yaml` file in your project root or `~/.config/apidiff/`:
//!
//! ```yaml
//! comparison:
//!   visibility: api-spi
//! behavior:
//!   fail_on_breaking: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::{ConfigPreset, CONFIG_FILE_STEM};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, CompareConfig, ComparePaths, ComparisonConfig,
    FilterConfig, OutputConfig, VisibilityFilter,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.apidiff.yaml` config files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
