//! Decoded generic signatures.

use serde::{Deserialize, Serialize};

/// One declared type parameter, e.g. `T extends Number & Comparable<T>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterDescriptor {
    pub name: String,
    /// Class bound as source text; `java.lang.Object` bounds are never recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_bound: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interface_bounds: Vec<String>,
}

impl TypeParameterDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Structured form of a class, method or field generic signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDescriptor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterDescriptor>,
    /// Erased name of the generic superclass of a class signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    /// Type arguments of the parameterized references outside type-parameter
    /// bounds, in order, as source text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<String>,
}

impl SignatureDescriptor {
    #[must_use]
    pub fn has_type_parameters(&self) -> bool {
        !self.type_parameters.is_empty()
    }

    #[must_use]
    pub fn has_type_arguments(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    #[must_use]
    pub fn type_parameter(&self, name: &str) -> Option<&TypeParameterDescriptor> {
        self.type_parameters.iter().find(|p| p.name == name)
    }
}
