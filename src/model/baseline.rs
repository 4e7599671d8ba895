//! In-memory API baselines: named sets of components and their class files.
//!
//! A baseline is usually loaded from a snapshot document (YAML or JSON)
//! listing each component's type descriptors and owner annotations. Types are
//! stored as encoded class-file bytes so that every lookup goes through a
//! [`ClassFileParser`](crate::parsers::ClassFileParser), exactly as it would
//! for class files read from disk.

use super::access::ApiAnnotations;
use super::descriptor::TypeDescriptor;
use super::handle::ElementHandle;
use super::names;
use crate::error::{ApiDiffError, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// Component
// ============================================================================

/// One versioned unit of API (a bundle or module) within a baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiComponent {
    pub id: String,
    pub version: Option<String>,
    pub execution_environments: Vec<String>,
    /// Components whose packages are visible to this one
    pub required_components: Vec<String>,
    /// System components are searched by every package resolution
    pub system: bool,
    annotations: IndexMap<String, ApiAnnotations>,
    class_files: IndexMap<String, Vec<u8>>,
}

impl ApiComponent {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_execution_environment(mut self, environment: impl Into<String>) -> Self {
        self.execution_environments.push(environment.into());
        self
    }

    #[must_use]
    pub fn with_required_component(mut self, id: impl Into<String>) -> Self {
        self.required_components.push(id.into());
        self
    }

    #[must_use]
    pub fn as_system(mut self) -> Self {
        self.system = true;
        self
    }

    /// Encode a descriptor as snapshot bytes and register it as a class file.
    pub fn add_type(&mut self, descriptor: &TypeDescriptor) -> Result<()> {
        let bytes = serde_json::to_vec(descriptor)?;
        self.add_class_file(descriptor.name.clone(), bytes);
        Ok(())
    }

    /// Register raw class-file bytes under a qualified type name.
    pub fn add_class_file(&mut self, type_name: impl Into<String>, bytes: Vec<u8>) {
        self.class_files.insert(type_name.into(), bytes);
    }

    pub fn annotate(&mut self, handle: &ElementHandle, annotations: ApiAnnotations) {
        self.annotations.insert(handle.key(), annotations);
    }

    #[must_use]
    pub fn annotation(&self, handle: &ElementHandle) -> Option<ApiAnnotations> {
        self.annotations.get(&handle.key()).copied()
    }

    #[must_use]
    pub fn class_file(&self, type_name: &str) -> Option<&[u8]> {
        self.class_files.get(type_name).map(Vec::as_slice)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.class_files.keys().map(String::as_str)
    }

    /// Packages containing at least one type, in first-seen order.
    #[must_use]
    pub fn package_names(&self) -> IndexSet<&str> {
        self.type_names().map(names::package_name).collect()
    }

    #[must_use]
    pub fn has_package(&self, package: &str) -> bool {
        self.type_names().any(|t| names::package_name(t) == package)
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.class_files.len()
    }
}

// ============================================================================
// Baseline
// ============================================================================

/// A named collection of components, resolved against one another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiBaseline {
    pub name: String,
    components: IndexMap<String, ApiComponent>,
}

impl ApiBaseline {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: IndexMap::new(),
        }
    }

    /// Add a component, replacing any component with the same id.
    pub fn add_component(&mut self, component: ApiComponent) {
        self.components.insert(component.id.clone(), component);
    }

    #[must_use]
    pub fn with_component(mut self, component: ApiComponent) -> Self {
        self.add_component(component);
        self
    }

    #[must_use]
    pub fn component(&self, id: &str) -> Option<&ApiComponent> {
        self.components.get(id)
    }

    pub fn components(&self) -> impl Iterator<Item = &ApiComponent> {
        self.components.values()
    }

    pub fn system_components(&self) -> impl Iterator<Item = &ApiComponent> {
        self.components.values().filter(|c| c.system)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

// ============================================================================
// Snapshot documents
// ============================================================================

/// On-disk form of a baseline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineDocument {
    pub name: String,
    pub components: Vec<ComponentDocument>,
}

/// On-disk form of a component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentDocument {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub execution_environments: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_components: Vec<String>,
    pub system: bool,
    pub types: Vec<TypeDescriptor>,
    /// Owner annotations keyed by element handle key (`T`, `T#f`, `T#m()V`)
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: IndexMap<String, ApiAnnotations>,
}

impl TryFrom<ComponentDocument> for ApiComponent {
    type Error = ApiDiffError;

    fn try_from(document: ComponentDocument) -> Result<Self> {
        if document.id.trim().is_empty() {
            return Err(ApiDiffError::missing_field("id", "component"));
        }
        let mut component = Self {
            id: document.id,
            version: document.version,
            execution_environments: document.execution_environments,
            required_components: document.required_components,
            system: document.system,
            annotations: document.annotations,
            class_files: IndexMap::new(),
        };
        for descriptor in &document.types {
            component.add_type(descriptor)?;
        }
        Ok(component)
    }
}

impl TryFrom<BaselineDocument> for ApiBaseline {
    type Error = ApiDiffError;

    fn try_from(document: BaselineDocument) -> Result<Self> {
        let mut baseline = Self::new(document.name);
        for component in document.components {
            if baseline.component(&component.id).is_some() {
                return Err(ApiDiffError::validation(format!(
                    "duplicate component id '{}' in baseline '{}'",
                    component.id, baseline.name
                )));
            }
            baseline.add_component(ApiComponent::try_from(component)?);
        }
        Ok(baseline)
    }
}
