//! Component and baseline level comparison.

use super::comparator::{ApiComparator, Comparison};
use super::status::{ComparisonStatus, Side};
use super::ComparisonScope;
use crate::delta::{Delta, DeltaFlag, DeltaKind, DeltaOutcome, DeltaTree, ElementType};
use crate::model::{ApiBaseline, ApiComponent, TypeDescriptor};
use crate::resolve::ResolutionContext;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashSet;

/// Top-level types of one component, parsed and keyed by qualified name in
/// class-file order.
struct ParsedTypes {
    types: IndexMap<String, TypeDescriptor>,
}

impl ParsedTypes {
    fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }
}

impl ApiComparator {
    fn parse_component(
        &self,
        side: Side,
        component: &ApiComponent,
        status: &mut ComparisonStatus,
    ) -> ParsedTypes {
        let mut types = IndexMap::with_capacity(component.type_count());
        for name in component.type_names() {
            let Some(bytes) = component.class_file(name) else {
                continue;
            };
            match self.parser().parse(bytes) {
                Ok(descriptor) if descriptor.is_nested() => {}
                Ok(descriptor) => {
                    types.insert(descriptor.name.clone(), descriptor);
                }
                Err(err) => status.record(side, &component.id, name, err.to_string()),
            }
        }
        ParsedTypes { types }
    }

    /// Whether a top-level type takes part in the comparison: inside the
    /// visibility mask, public or protected under the API mask, and not
    /// excluded by name.
    fn is_candidate(
        &self,
        side: Side,
        context: &dyn ResolutionContext,
        component: &str,
        descriptor: &TypeDescriptor,
        status: &mut ComparisonStatus,
    ) -> bool {
        if self.is_excluded(&descriptor.name) {
            tracing::debug!(type_name = %descriptor.name, "type excluded");
            return false;
        }
        let annotations = match context.resolve_annotations(component, &descriptor.handle()) {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                status.record(side, component, &descriptor.name, err.to_string());
                return false;
            }
        };
        let mask = self.visibility();
        mask.contains(annotations.visibility)
            && (!mask.is_api_only() || descriptor.access.is_visible())
    }

    /// Compare two versions of a component.
    ///
    /// Types missing from the new version are reported as REMOVED/TYPE and
    /// new types as ADDED/TYPE on the component; the deltas of each changed
    /// type are grouped under one CHANGED/TYPE node. Type pairs are compared
    /// in parallel.
    #[must_use]
    pub fn compare_components(
        &self,
        old_context: &dyn ResolutionContext,
        old: &ApiComponent,
        new_context: &dyn ResolutionContext,
        new: &ApiComponent,
    ) -> Comparison {
        let _entered = self.span().enter();
        tracing::info!(component = %new.id, "comparing component");

        let mut status = ComparisonStatus::default();
        let mut deltas = compare_environments(old, new);

        let old_types = self.parse_component(Side::Old, old, &mut status);
        let new_types = self.parse_component(Side::New, new, &mut status);

        let mut pairs: Vec<(&TypeDescriptor, &TypeDescriptor)> = Vec::new();
        let mut old_candidates: HashSet<&str> = HashSet::new();
        for old_type in old_types.iter() {
            if !self.is_candidate(Side::Old, old_context, &old.id, old_type, &mut status) {
                continue;
            }
            old_candidates.insert(&old_type.name);
            match new_types.get(&old_type.name) {
                Some(new_type) => pairs.push((old_type, new_type)),
                None => deltas.push(type_delta(DeltaKind::Removed, old, old_type)),
            }
        }

        let old_scope = ComparisonScope::new(old_context, &old.id);
        let new_scope = ComparisonScope::new(new_context, &new.id);
        let compared: Vec<(Option<Delta>, ComparisonStatus)> = pairs
            .par_iter()
            .map(|(old_type, new_type)| {
                let comparison =
                    self.compare_with_status(old_type, new_type, old_scope, new_scope, self.visibility());
                let children = comparison.outcome.into_children();
                let group = (!children.is_empty()).then(|| {
                    Delta::new(
                        ElementType::of_category(new_type.category()),
                        DeltaKind::Changed,
                        DeltaFlag::Type,
                        new_type.name.as_str(),
                        new_type.name.as_str(),
                    )
                    .with_modifiers(old_type.access, new_type.access)
                    .with_component(Some(&new.id))
                    .with_arguments([new_type.name.replace('$', ".")])
                    .with_children(children)
                });
                (group, comparison.status)
            })
            .collect();
        for (group, pair_status) in compared {
            deltas.extend(group);
            status.merge(pair_status);
        }

        for new_type in new_types.iter() {
            if old_candidates.contains(&new_type.name.as_str()) {
                continue;
            }
            if self.is_candidate(Side::New, new_context, &new.id, new_type, &mut status) {
                deltas.push(type_delta(DeltaKind::Added, new, new_type));
            }
        }

        tracing::debug!(
            component = %new.id,
            compared = pairs.len(),
            deltas = deltas.len(),
            issues = status.len(),
            "component compared"
        );
        Comparison::new(DeltaOutcome::from_tree(DeltaTree::from(deltas)), status)
    }

    /// Compare every non-system component of two baselines.
    ///
    /// Components only present in one baseline are reported as
    /// ADDED/REMOVED API_COMPONENT; the deltas of each changed component are
    /// grouped under one CHANGED/API_COMPONENT node.
    #[must_use]
    pub fn compare_baselines(&self, old: &ApiBaseline, new: &ApiBaseline) -> Comparison {
        self.compare_selected(old, new, |_| true)
    }

    /// Compare the non-system components of two baselines accepted by
    /// `select`, reporting them the way [`compare_baselines`](Self::compare_baselines) does.
    pub fn compare_selected<F>(&self, old: &ApiBaseline, new: &ApiBaseline, select: F) -> Comparison
    where
        F: Fn(&str) -> bool,
    {
        let mut status = ComparisonStatus::default();
        let mut deltas = Vec::new();

        for old_component in old.components().filter(|c| !c.system && select(&c.id)) {
            let Some(new_component) = new.component(&old_component.id) else {
                deltas.push(component_delta(DeltaKind::Removed, old_component));
                continue;
            };
            let comparison = self.compare_components(old, old_component, new, new_component);
            status.merge(comparison.status);
            let children = comparison.outcome.into_children();
            if !children.is_empty() {
                deltas.push(
                    Delta::new(
                        ElementType::ApiComponent,
                        DeltaKind::Changed,
                        DeltaFlag::ApiComponent,
                        new_component.id.as_str(),
                        new_component.id.as_str(),
                    )
                    .with_component(Some(&new_component.id))
                    .with_arguments([new_component.id.as_str()])
                    .with_children(children),
                );
            }
        }

        for new_component in new.components().filter(|c| !c.system && select(&c.id)) {
            if old.component(&new_component.id).is_none() {
                deltas.push(component_delta(DeltaKind::Added, new_component));
            }
        }

        Comparison::new(DeltaOutcome::from_tree(DeltaTree::from(deltas)), status)
    }
}

fn compare_environments(old: &ApiComponent, new: &ApiComponent) -> Vec<Delta> {
    let removed = old
        .execution_environments
        .iter()
        .filter(|e| !new.execution_environments.contains(e))
        .map(|e| (DeltaKind::Removed, e));
    let added = new
        .execution_environments
        .iter()
        .filter(|e| !old.execution_environments.contains(e))
        .map(|e| (DeltaKind::Added, e));
    removed
        .chain(added)
        .map(|(kind, environment)| {
            Delta::new(
                ElementType::ApiComponent,
                kind,
                DeltaFlag::ExecutionEnvironment,
                new.id.as_str(),
                environment.as_str(),
            )
            .with_component(Some(&new.id))
            .with_arguments([environment.as_str(), new.id.as_str()])
        })
        .collect()
}

fn type_delta(kind: DeltaKind, component: &ApiComponent, descriptor: &TypeDescriptor) -> Delta {
    Delta::new(
        ElementType::ApiComponent,
        kind,
        DeltaFlag::Type,
        descriptor.name.as_str(),
        descriptor.name.as_str(),
    )
    .with_modifiers(descriptor.access, descriptor.access)
    .with_component(Some(&component.id))
    .with_arguments([descriptor.name.as_str(), component.id.as_str()])
}

fn component_delta(kind: DeltaKind, component: &ApiComponent) -> Delta {
    Delta::new(
        ElementType::ApiBaseline,
        kind,
        DeltaFlag::ApiComponent,
        component.id.as_str(),
        component.id.as_str(),
    )
    .with_component(Some(&component.id))
    .with_arguments([component.id.as_str()])
}
