//! Handles naming a type or member for annotation lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a type, field or method independently of its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementHandle {
    Type {
        type_name: String,
    },
    Field {
        type_name: String,
        name: String,
    },
    Method {
        type_name: String,
        name: String,
        descriptor: String,
    },
}

impl ElementHandle {
    #[must_use]
    pub fn type_(type_name: &str) -> Self {
        Self::Type {
            type_name: type_name.to_string(),
        }
    }

    #[must_use]
    pub fn field(type_name: &str, name: &str) -> Self {
        Self::Field {
            type_name: type_name.to_string(),
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn method(type_name: &str, name: &str, descriptor: &str) -> Self {
        Self::Method {
            type_name: type_name.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        }
    }

    /// Qualified name of the type owning this element.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Type { type_name }
            | Self::Field { type_name, .. }
            | Self::Method { type_name, .. } => type_name,
        }
    }

    /// Flat lookup key: `Type`, `Type#field` or `Type#method(desc)`.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type { type_name } => write!(f, "{type_name}"),
            Self::Field { type_name, name } => write!(f, "{type_name}#{name}"),
            Self::Method {
                type_name,
                name,
                descriptor,
            } => write!(f, "{type_name}#{name}{descriptor}"),
        }
    }
}
