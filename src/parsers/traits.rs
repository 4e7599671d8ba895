//! Parser trait definitions.
//!
//! A [`ClassFileParser`] turns the raw bytes a resolution context hands out
//! into a [`TypeDescriptor`]. Detection is cheap and lets callers report a
//! useful error before attempting a full parse.

use crate::error::Result;
use crate::model::TypeDescriptor;

/// Leading bytes of a compiled JVM class file.
pub const CLASS_FILE_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

/// Confidence level for format detection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    /// Definitely not this format
    pub const NONE: Self = Self(0.0);
    /// Might be this format
    pub const LOW: Self = Self(0.25);
    /// Almost certainly this format
    pub const HIGH: Self = Self(0.75);
    /// Definitely this format
    pub const CERTAIN: Self = Self(1.0);

    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Check if this confidence indicates the format can be parsed
    #[must_use]
    pub fn can_parse(&self) -> bool {
        self.0 >= Self::LOW.0
    }
}

impl Default for FormatConfidence {
    fn default() -> Self {
        Self::NONE
    }
}

/// Trait for class-file parsers.
///
/// Implementations are shared across the worker threads of a component
/// comparison, so they must be `Send + Sync`.
pub trait ClassFileParser: Send + Sync {
    /// Parse one compiled type
    fn parse(&self, bytes: &[u8]) -> Result<TypeDescriptor>;

    /// Get format name
    fn format_name(&self) -> &str;

    /// Lightweight structural check without a full parse
    fn detect(&self, bytes: &[u8]) -> FormatConfidence;

    /// Quick check if this parser can likely handle the bytes
    fn can_parse(&self, bytes: &[u8]) -> bool {
        self.detect(bytes).can_parse()
    }
}

/// True when the bytes start with the class-file magic number.
#[must_use]
pub fn is_class_file(bytes: &[u8]) -> bool {
    bytes.starts_with(&CLASS_FILE_MAGIC)
}
