//! Baseline snapshot loading.
//!
//! Snapshots are YAML or JSON [`BaselineDocument`]s. The format is taken from
//! the file extension and sniffed from the content otherwise.

use crate::error::{ApiDiffError, ErrorContext};
use crate::model::{ApiBaseline, BaselineDocument};
use anyhow::Result;
use std::path::Path;

/// Serialization of a baseline snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from the file extension, falling back to the content.
    #[must_use]
    pub fn detect(path: &Path, content: &str) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::sniff(content),
        }
    }

    /// JSON documents start with an object; everything else is read as YAML.
    #[must_use]
    pub fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

/// Parse a baseline snapshot from a string.
pub fn load_baseline_str(content: &str, format: SnapshotFormat) -> crate::error::Result<ApiBaseline> {
    let document: BaselineDocument = match format {
        SnapshotFormat::Json => serde_json::from_str(content).context("baseline snapshot")?,
        SnapshotFormat::Yaml => serde_yaml::from_str(content).context("baseline snapshot")?,
    };
    ApiBaseline::try_from(document).context("baseline snapshot")
}

/// Load a baseline snapshot with context for error messages.
///
/// A snapshot without a name is named after its file stem.
pub fn load_baseline(path: &Path, quiet: bool) -> Result<ApiBaseline> {
    if !quiet {
        tracing::info!("Loading baseline: {:?}", path);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ApiDiffError::io(path, e))?;
    let format = SnapshotFormat::detect(path, &content);
    let mut baseline =
        load_baseline_str(&content, format).with_context(|| path.display().to_string())?;

    if baseline.name.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            baseline.name = stem.to_string();
        }
    }

    if !quiet {
        tracing::info!(
            "Loaded baseline '{}' with {} components",
            baseline.name,
            baseline.len()
        );
    }

    Ok(baseline)
}
