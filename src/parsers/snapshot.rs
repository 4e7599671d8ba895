//! Descriptor snapshot parser.
//!
//! Reads the JSON encoding of a [`TypeDescriptor`] produced by an external
//! bytecode reader (or by [`ApiComponent::add_type`](crate::model::ApiComponent::add_type)).

use super::traits::{is_class_file, ClassFileParser, FormatConfidence};
use crate::error::{ApiDiffError, ParseErrorKind, Result};
use crate::model::TypeDescriptor;

/// Parser for JSON descriptor snapshots
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotParser {
    /// Reject snapshots whose declared name is not a qualified dotted name
    strict: bool,
}

impl SnapshotParser {
    #[must_use]
    pub const fn new() -> Self {
        Self { strict: false }
    }

    /// Create a strict parser that validates type names
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }

    fn validate(&self, descriptor: &TypeDescriptor) -> Result<()> {
        if descriptor.name.is_empty() {
            return Err(ApiDiffError::missing_field("name", "type snapshot"));
        }
        if self.strict && descriptor.name.contains('/') {
            return Err(ApiDiffError::invalid_descriptor(
                &descriptor.name,
                "type names must use dotted form",
            ));
        }
        Ok(())
    }
}

impl ClassFileParser for SnapshotParser {
    fn parse(&self, bytes: &[u8]) -> Result<TypeDescriptor> {
        if is_class_file(bytes) {
            return Err(ApiDiffError::parse(
                "class file",
                ParseErrorKind::UnknownFormat(
                    "raw class files need a bytecode reader; supply a descriptor snapshot".into(),
                ),
            ));
        }
        let descriptor: TypeDescriptor = serde_json::from_slice(bytes)?;
        self.validate(&descriptor)?;
        Ok(descriptor)
    }

    fn format_name(&self) -> &str {
        "descriptor snapshot"
    }

    fn detect(&self, bytes: &[u8]) -> FormatConfidence {
        if is_class_file(bytes) {
            return FormatConfidence::NONE;
        }
        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
        let trimmed = head.trim_start();
        if !trimmed.starts_with('{') {
            return FormatConfidence::NONE;
        }
        if trimmed.contains("\"name\"") && trimmed.contains("\"access\"") {
            FormatConfidence::CERTAIN
        } else {
            FormatConfidence::LOW
        }
    }
}
