//! Resolution of packages, class files and owner annotations.
//!
//! The comparison engine consults a [`ResolutionContext`] whenever it needs
//! something outside the two descriptors being compared: an ancestor's
//! descriptor, a thrown type's hierarchy, a nested member's full descriptor,
//! or the visibility and restrictions an API owner declared for an element.
//!
//! [`ApiBaseline`](crate::model::ApiBaseline) implements the trait in memory.

mod baseline;

use crate::error::Result;
use crate::model::{ApiAnnotations, ElementHandle};

/// Raw bytes of one compiled type, as found in a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub type_name: String,
    /// Component the bytes were found in
    pub component_id: String,
    pub bytes: Vec<u8>,
}

/// Lookup services the comparison engine needs from its environment.
///
/// Contexts are shared read-only across worker threads. `Ok(None)` means
/// "not found" and lets the engine fall back to a conservative answer;
/// `Err` is recorded as a resolution issue on the comparison status.
pub trait ResolutionContext: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Components visible from `component` that define types in `package`.
    fn resolve_package(&self, component: &str, package: &str) -> Result<Option<Vec<String>>>;

    /// First class file named `type_name` among `components`, in order.
    fn find_class_file(&self, components: &[String], type_name: &str)
        -> Result<Option<ClassFile>>;

    /// Visibility and restrictions declared for an element.
    ///
    /// `None` means the element carries no annotations, which is treated as
    /// unrestricted API.
    fn resolve_annotations(
        &self,
        component: &str,
        handle: &ElementHandle,
    ) -> Result<Option<ApiAnnotations>>;
}
