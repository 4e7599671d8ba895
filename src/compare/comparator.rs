//! Public entry point of the comparison engine.

use super::engine::TypeComparison;
use super::status::ComparisonStatus;
use super::ComparisonScope;
use crate::delta::{DeltaOutcome, DeltaTree};
use crate::model::{TypeDescriptor, VisibilityMask};
use crate::parsers::{default_parser, ClassFileParser};
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use tracing::Span;

/// Outcome of a comparison together with the lookups that failed on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub outcome: DeltaOutcome,
    pub status: ComparisonStatus,
}

impl Comparison {
    #[must_use]
    pub fn new(outcome: DeltaOutcome, status: ComparisonStatus) -> Self {
        Self { outcome, status }
    }

    /// Whether every leaf of the outcome is binary compatible.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.outcome.is_compatible()
    }
}

/// Compares API types, components and baselines.
///
/// The comparator itself is immutable; every call builds its own lookup
/// cache, so one instance can serve concurrent comparisons.
#[derive(Clone)]
pub struct ApiComparator {
    parser: Arc<dyn ClassFileParser>,
    span: Span,
    visibility: VisibilityMask,
    exclusions: Vec<Regex>,
}

impl ApiComparator {
    /// Create a comparator with the snapshot parser and the API mask
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: default_parser(),
            span: Span::none(),
            visibility: VisibilityMask::API,
            exclusions: Vec::new(),
        }
    }

    /// Use a different parser for class files handed out by the contexts
    #[must_use]
    pub fn with_parser(mut self, parser: Arc<dyn ClassFileParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Run every comparison inside this span
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Visibility mask used by component and baseline comparisons
    #[must_use]
    pub fn with_visibility(mut self, visibility: VisibilityMask) -> Self {
        self.visibility = visibility;
        self
    }

    /// Types whose qualified name matches any of these are not compared
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: Vec<Regex>) -> Self {
        self.exclusions = exclusions;
        self
    }

    #[must_use]
    pub const fn visibility(&self) -> VisibilityMask {
        self.visibility
    }

    pub(super) fn parser(&self) -> &dyn ClassFileParser {
        self.parser.as_ref()
    }

    pub(super) const fn span(&self) -> &Span {
        &self.span
    }

    pub(super) fn is_excluded(&self, type_name: &str) -> bool {
        self.exclusions.iter().any(|re| re.is_match(type_name))
    }

    /// Compare two versions of a type.
    ///
    /// Returns [`DeltaOutcome::NoDelta`] when nothing observable changed.
    /// Resolution problems are logged; use
    /// [`compare_with_status`](Self::compare_with_status) to inspect them.
    #[must_use]
    pub fn compare(
        &self,
        old: &TypeDescriptor,
        new: &TypeDescriptor,
        old_scope: ComparisonScope<'_>,
        new_scope: ComparisonScope<'_>,
        mask: VisibilityMask,
    ) -> DeltaOutcome {
        self.compare_with_status(old, new, old_scope, new_scope, mask)
            .outcome
    }

    /// Compare two versions of a type and report failed lookups.
    #[must_use]
    pub fn compare_with_status(
        &self,
        old: &TypeDescriptor,
        new: &TypeDescriptor,
        old_scope: ComparisonScope<'_>,
        new_scope: ComparisonScope<'_>,
        mask: VisibilityMask,
    ) -> Comparison {
        self.span.in_scope(|| {
            tracing::debug!(
                old = %old.name,
                new = %new.name,
                component = new_scope.component,
                "comparing types"
            );
            let mut comparison = TypeComparison::new(self.parser(), old_scope, new_scope, mask);
            let deltas = comparison.compare_types(old, new);
            Comparison::new(
                DeltaOutcome::from_tree(DeltaTree::from(deltas)),
                comparison.into_status(),
            )
        })
    }
}

impl Default for ApiComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ApiComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiComparator")
            .field("parser", &self.parser.format_name())
            .field("visibility", &self.visibility)
            .field("exclusions", &self.exclusions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::{DeltaFlag, DeltaKind, ElementType};
    use crate::model::{
        AccessFlags, ApiAnnotations, ApiBaseline, ApiComponent, FieldDescriptor,
        MethodDescriptor, Restrictions, Visibility,
    };

    const PUBLIC: u32 = AccessFlags::PUBLIC;

    fn baseline(types: &[&TypeDescriptor]) -> ApiBaseline {
        let mut component = ApiComponent::new("core");
        for descriptor in types {
            component.add_type(descriptor).unwrap();
        }
        ApiBaseline::new("test").with_component(component)
    }

    fn compare(old: &TypeDescriptor, new: &TypeDescriptor) -> DeltaOutcome {
        let old_baseline = baseline(&[old]);
        let new_baseline = baseline(&[new]);
        ApiComparator::new().compare(
            old,
            new,
            ComparisonScope::new(&old_baseline, "core"),
            ComparisonScope::new(&new_baseline, "core"),
            VisibilityMask::API,
        )
    }

    fn leaf_tuples(outcome: &DeltaOutcome) -> Vec<(ElementType, DeltaKind, DeltaFlag)> {
        outcome
            .leaves()
            .iter()
            .map(|d| (d.element_type, d.kind, d.flag))
            .collect()
    }

    #[test]
    fn test_identical_types_yield_no_delta() {
        let t = TypeDescriptor::new("a.A", PUBLIC)
            .with_field(FieldDescriptor::new("f", PUBLIC, "I"))
            .with_method(MethodDescriptor::new("m", PUBLIC, "()V"));
        assert!(compare(&t, &t.clone()).is_no_delta());
    }

    #[test]
    fn test_removed_public_field() {
        let old = TypeDescriptor::new("a.A", PUBLIC)
            .with_field(FieldDescriptor::new("f", PUBLIC, "I"));
        let new = TypeDescriptor::new("a.A", PUBLIC);
        let outcome = compare(&old, &new);
        assert_eq!(
            leaf_tuples(&outcome),
            vec![(ElementType::Class, DeltaKind::Removed, DeltaFlag::Field)]
        );
        assert!(!outcome.is_compatible());
    }

    #[test]
    fn test_removed_private_method_is_non_visible() {
        let old = TypeDescriptor::new("a.A", PUBLIC)
            .with_method(MethodDescriptor::new("m", AccessFlags::PRIVATE, "()V"));
        let new = TypeDescriptor::new("a.A", PUBLIC);
        let outcome = compare(&old, &new);
        assert_eq!(
            leaf_tuples(&outcome),
            vec![(ElementType::Class, DeltaKind::RemovedNonVisible, DeltaFlag::Method)]
        );
        assert!(outcome.is_compatible());
    }

    #[test]
    fn test_category_change_is_exclusive() {
        let old = TypeDescriptor::new("a.A", PUBLIC)
            .with_method(MethodDescriptor::new("m", PUBLIC, "()V"));
        let new = TypeDescriptor::new("a.A", PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT);
        let outcome = compare(&old, &new);
        assert_eq!(
            leaf_tuples(&outcome),
            vec![(ElementType::Class, DeltaKind::Changed, DeltaFlag::ToInterface)]
        );
    }

    #[test]
    fn test_type_leaving_api_is_removed() {
        let t = TypeDescriptor::new("a.A", PUBLIC);
        let old_baseline = baseline(&[&t]);
        let mut component = ApiComponent::new("core");
        component.add_type(&t).unwrap();
        component.annotate(
            &t.handle(),
            ApiAnnotations::new(Visibility::Private, Restrictions::NONE),
        );
        let new_baseline = ApiBaseline::new("test").with_component(component);

        let outcome = ApiComparator::new().compare(
            &t,
            &t,
            ComparisonScope::new(&old_baseline, "core"),
            ComparisonScope::new(&new_baseline, "core"),
            VisibilityMask::API,
        );
        assert_eq!(
            leaf_tuples(&outcome),
            vec![(ElementType::Class, DeltaKind::Removed, DeltaFlag::Type)]
        );
    }

    #[test]
    fn test_unresolvable_exception_is_recorded() {
        let old = TypeDescriptor::new("a.A", PUBLIC)
            .with_method(MethodDescriptor::new("m", PUBLIC, "()V"));
        let new = TypeDescriptor::new("a.A", PUBLIC).with_method(
            MethodDescriptor::new("m", PUBLIC, "()V").with_exceptions(["b.Missing"]),
        );
        let old_baseline = baseline(&[&old]);
        let new_baseline = baseline(&[&new]);
        let comparison = ApiComparator::new().compare_with_status(
            &old,
            &new,
            ComparisonScope::new(&old_baseline, "core"),
            ComparisonScope::new(&new_baseline, "core"),
            VisibilityMask::API,
        );

        assert_eq!(
            leaf_tuples(&comparison.outcome),
            vec![(ElementType::Method, DeltaKind::Added, DeltaFlag::CheckedException)]
        );
        assert!(!comparison.status.is_ok());
        assert_eq!(comparison.status.issues()[0].type_name, "b.Missing");
    }

    #[test]
    fn test_exclusions_match_type_names() {
        let comparator = ApiComparator::new()
            .with_exclusions(vec![Regex::new(r"\.internal\.").unwrap()]);
        assert!(comparator.is_excluded("org.example.internal.Impl"));
        assert!(!comparator.is_excluded("org.example.Api"));
    }
}
