//! Default configurations and presets for apidiff.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AppConfig, BehaviorConfig, ComparisonConfig, VisibilityFilter};
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Publicly supported API only, fail on breaking changes
    Api,
    /// API plus service provider interfaces
    ApiSpi,
    /// Every type, internal ones included
    All,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::ApiSpi => "api-spi",
            Self::All => "all",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "api" | "default" => Some(Self::Api),
            "api-spi" | "spi" => Some(Self::ApiSpi),
            "all" | "internal" => Some(Self::All),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Api => "Compare the publicly supported API and fail on breaking changes",
            Self::ApiSpi => "Also compare service provider interfaces",
            Self::All => "Compare every type, including internal ones, as JSON",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Api, Self::ApiSpi, Self::All]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Api => Self::api_preset(),
            ConfigPreset::ApiSpi => Self::api_spi_preset(),
            ConfigPreset::All => Self::all_preset(),
        }
    }

    /// Public API preset.
    ///
    /// - API visibility only
    /// - Fail on breaking changes
    #[must_use]
    pub fn api_preset() -> Self {
        Self {
            behavior: BehaviorConfig {
                fail_on_breaking: true,
                ..BehaviorConfig::default()
            },
            ..Self::default()
        }
    }

    /// API and SPI preset.
    #[must_use]
    pub fn api_spi_preset() -> Self {
        Self {
            comparison: ComparisonConfig {
                visibility: VisibilityFilter::ApiSpi,
                ..ComparisonConfig::default()
            },
            ..Self::api_preset()
        }
    }

    /// Everything preset, for auditing internal changes.
    ///
    /// - Every visibility level
    /// - JSON output
    /// - No fail modes
    #[must_use]
    pub fn all_preset() -> Self {
        let mut config = Self {
            comparison: ComparisonConfig {
                visibility: VisibilityFilter::All,
                ..ComparisonConfig::default()
            },
            ..Self::default()
        };
        config.output.format = ReportFormat::Json;
        config
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Base name of configuration files.
pub const CONFIG_FILE_STEM: &str = "apidiff";

// ============================================================================
// Tests
// ============================================================================
