//! Configuration validation for apidiff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, CompareConfig, ComparisonConfig, FilterConfig, OutputConfig};
use regex::Regex;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.comparison.validate());
        errors.extend(self.filtering.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.components
            .iter()
            .enumerate()
            .filter(|(_, id)| id.trim().is_empty())
            .map(|(i, _)| ConfigError {
                field: format!("comparison.components[{i}]"),
                message: "Component id must not be empty".to_string(),
            })
            .collect()
    }
}

impl Validatable for FilterConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (i, pattern) in self.exclude_types.iter().enumerate() {
            if let Err(e) = Regex::new(pattern) {
                errors.push(ConfigError {
                    field: format!("filtering.exclude_types[{i}]"),
                    message: format!("Invalid pattern '{pattern}': {e}"),
                });
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_ref().and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // BehaviorConfig contains only boolean flags that don't need validation
        Vec::new()
    }
}

impl Validatable for CompareConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.paths.old.exists() {
            errors.push(ConfigError {
                field: "paths.old".to_string(),
                message: format!("File not found: {}", self.paths.old.display()),
            });
        }
        if !self.paths.new.exists() {
            errors.push(ConfigError {
                field: "paths.new".to_string(),
                message: format!("File not found: {}", self.paths.new.display()),
            });
        }

        errors.extend(self.comparison.validate());
        errors.extend(self.filtering.validate());
        errors.extend(self.output.validate());
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComparePaths;
    use std::path::PathBuf;

    #[test]
    fn test_filter_config_validation() {
        let valid = FilterConfig {
            exclude_types: vec![r"\.internal\.".to_string()],
            only_breaking: false,
        };
        assert!(valid.is_valid());

        let invalid = FilterConfig {
            exclude_types: vec!["(unclosed".to_string()],
            only_breaking: false,
        };
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "filtering.exclude_types[0]");
    }

    #[test]
    fn test_comparison_config_validation() {
        let invalid = ComparisonConfig {
            components: vec!["core".to_string(), " ".to_string()],
            ..ComparisonConfig::default()
        };
        assert_eq!(invalid.validate()[0].field, "comparison.components[1]");
    }

    #[test]
    fn test_output_config_validation() {
        let invalid = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.json")),
            ..OutputConfig::default()
        };
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_compare_config_missing_paths() {
        let config = CompareConfig::from_app(
            ComparePaths {
                old: PathBuf::from("/nonexistent/old.yaml"),
                new: PathBuf::from("/nonexistent/new.yaml"),
            },
            AppConfig::default(),
        );
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError {
            field: "test_field".to_string(),
            message: "test error message".to_string(),
        };
        assert_eq!(error.to_string(), "test_field: test error message");
    }

    #[test]
    fn test_app_config_validation() {
        assert!(AppConfig::default().is_valid());

        let mut invalid = AppConfig::default();
        invalid.filtering.exclude_types.push("[".to_string());
        assert!(!invalid.is_valid());
    }
}
