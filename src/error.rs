//! Unified error types for apidiff.
//!
//! The comparison engine itself never fails: resolution and parse problems
//! degrade into conservative answers and are recorded in a
//! [`ComparisonStatus`](crate::compare::ComparisonStatus). The errors defined
//! here surface from the edges of the library (loading baselines, decoding
//! class-file snapshots, writing reports, reading configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for apidiff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiDiffError {
    /// Errors while decoding a class-file snapshot or baseline document
    #[error("Failed to parse: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while resolving a type, package or component
    #[error("Resolution failed: {context}")]
    Resolve {
        context: String,
        #[source]
        source: ResolveErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Malformed descriptor '{descriptor}': {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },

    #[error("Unrecognized document format: {0}")]
    UnknownFormat(String),
}

/// Specific resolution error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveErrorKind {
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    #[error("Package {package} is not exported to {component}")]
    PackageNotFound { package: String, component: String },

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Class file for {type_name} could not be read: {reason}")]
    UnreadableClassFile { type_name: String, reason: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for apidiff operations
pub type Result<T> = std::result::Result<T, ApiDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ApiDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a parse error for a malformed type or method descriptor
    pub fn invalid_descriptor(descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::parse(
            "decoding descriptor",
            ParseErrorKind::InvalidDescriptor {
                descriptor: descriptor.into(),
                reason: reason.into(),
            },
        )
    }

    /// Create a resolution error with context
    pub fn resolve(context: impl Into<String>, source: ResolveErrorKind) -> Self {
        Self::Resolve {
            context: context.into(),
            source,
        }
    }

    /// Create a resolution error for a type that no component defines
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self::resolve(
            format!("looking up {type_name}"),
            ResolveErrorKind::TypeNotFound(type_name),
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ApiDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ApiDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for ApiDiffError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse(
            "YAML deserialization",
            ParseErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Each call prepends its context to the error's existing context, so the
/// final message reads from the outermost operation inwards.
///
/// # Example
///
/// ```ignore
/// use apidiff::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<ApiBaseline> {
///     let content = std::fs::read_to_string(path)
///         .context("reading baseline")?;
///
///     serde_yaml::from_str(&content)
///         .with_context(|| format!("decoding baseline {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ApiDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ApiDiffError, new_ctx: &str) -> ApiDiffError {
    match err {
        ApiDiffError::Parse {
            context: existing,
            source,
        } => ApiDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Resolve {
            context: existing,
            source,
        } => ApiDiffError::Resolve {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Report {
            context: existing,
            source,
        } => ApiDiffError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ApiDiffError::Io {
            path,
            message,
            source,
        } => ApiDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ApiDiffError::Config(msg) => ApiDiffError::Config(chain_context(new_ctx, &msg)),
        ApiDiffError::Validation(msg) => ApiDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
