//! In-memory resolution against an [`ApiBaseline`].

use super::{ClassFile, ResolutionContext};
use crate::error::{ApiDiffError, ErrorContext, ResolveErrorKind, Result};
use crate::model::{ApiAnnotations, ApiBaseline, ApiComponent, ElementHandle};

impl ApiBaseline {
    fn require_component(&self, id: &str) -> Result<&ApiComponent> {
        self.component(id).ok_or_else(|| {
            ApiDiffError::resolve(
                format!("baseline '{}'", self.name),
                ResolveErrorKind::ComponentNotFound(id.to_string()),
            )
        })
    }
}

impl ResolutionContext for ApiBaseline {
    fn name(&self) -> &str {
        &self.name
    }

    /// Searches the component itself, then its required components, then
    /// every system component.
    fn resolve_package(&self, component: &str, package: &str) -> Result<Option<Vec<String>>> {
        let origin = self
            .require_component(component)
            .with_context(|| format!("package {package}"))?;

        let mut found: Vec<String> = Vec::new();
        let mut consider = |candidate: &ApiComponent| {
            if candidate.has_package(package) && !found.iter().any(|id| id == &candidate.id) {
                found.push(candidate.id.clone());
            }
        };

        consider(origin);
        for required in &origin.required_components {
            match self.component(required) {
                Some(candidate) => consider(candidate),
                None => tracing::debug!(
                    component,
                    required = required.as_str(),
                    "required component missing from baseline"
                ),
            }
        }
        for system in self.system_components() {
            consider(system);
        }

        Ok(if found.is_empty() { None } else { Some(found) })
    }

    fn find_class_file(
        &self,
        components: &[String],
        type_name: &str,
    ) -> Result<Option<ClassFile>> {
        for id in components {
            let Some(component) = self.component(id) else {
                continue;
            };
            if let Some(bytes) = component.class_file(type_name) {
                return Ok(Some(ClassFile {
                    type_name: type_name.to_string(),
                    component_id: component.id.clone(),
                    bytes: bytes.to_vec(),
                }));
            }
        }
        Ok(None)
    }

    fn resolve_annotations(
        &self,
        component: &str,
        handle: &ElementHandle,
    ) -> Result<Option<ApiAnnotations>> {
        let origin = self
            .require_component(component)
            .with_context(|| format!("annotations of {}", handle.key()))?;
        Ok(origin.annotation(handle))
    }
}
