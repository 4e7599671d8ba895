//! Type lookups made on behalf of the comparison: resolving descriptors,
//! owner annotations, ancestor and interface sets, and exception kinds.

use super::engine::{Resolved, TypeComparison};
use super::status::Side;
use crate::model::names::{self, JAVA_LANG_ERROR, JAVA_LANG_OBJECT, JAVA_LANG_RUNTIME_EXCEPTION};
use crate::model::{ApiAnnotations, ElementHandle, TypeDescriptor};
use indexmap::IndexSet;
use std::collections::HashSet;
use std::rc::Rc;

/// Result of walking a hierarchy.
#[derive(Debug)]
pub(super) struct Walk {
    pub(super) types: IndexSet<TypeDescriptor>,
    /// False when some link could not be resolved
    pub(super) complete: bool,
}

impl Walk {
    fn new() -> Self {
        Self {
            types: IndexSet::new(),
            complete: true,
        }
    }

    /// The collected set, absent when empty.
    pub(super) fn set(&self) -> Option<&IndexSet<TypeDescriptor>> {
        if self.types.is_empty() {
            None
        } else {
            Some(&self.types)
        }
    }
}

impl TypeComparison<'_> {
    /// Annotations for an element of the compared component.
    pub(super) fn annotations(&mut self, side: Side, handle: &ElementHandle) -> ApiAnnotations {
        let component = self.scope(side).component;
        self.annotations_in(side, component, handle)
    }

    /// Annotations for an element of any component; unannotated means API.
    pub(super) fn annotations_in(
        &mut self,
        side: Side,
        component: &str,
        handle: &ElementHandle,
    ) -> ApiAnnotations {
        match self.scope(side).context.resolve_annotations(component, handle) {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                self.status
                    .record(side, component, handle.type_name(), err.to_string());
                ApiAnnotations::default()
            }
        }
    }

    /// Resolve a type by name through the scope's package resolution.
    pub(super) fn find_type(&mut self, side: Side, type_name: &str) -> Option<Rc<Resolved>> {
        let key = (side, type_name.to_string());
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }
        let resolved = self.lookup(side, type_name).map(Rc::new);
        self.cache.insert(key, resolved.clone());
        resolved
    }

    fn lookup(&mut self, side: Side, type_name: &str) -> Option<Resolved> {
        let scope = self.scope(side);
        let package = names::package_name(type_name);
        tracing::debug!(%side, type_name, package, "resolving type");

        let components = match scope.context.resolve_package(scope.component, package) {
            Ok(Some(components)) => components,
            Ok(None) => {
                self.status.record(
                    side,
                    scope.component,
                    type_name,
                    format!("package '{package}' is not visible"),
                );
                return None;
            }
            Err(err) => {
                self.status
                    .record(side, scope.component, type_name, err.to_string());
                return None;
            }
        };

        let class_file = match scope.context.find_class_file(&components, type_name) {
            Ok(Some(class_file)) => class_file,
            Ok(None) => {
                self.status
                    .record(side, scope.component, type_name, "class file not found");
                return None;
            }
            Err(err) => {
                self.status
                    .record(side, scope.component, type_name, err.to_string());
                return None;
            }
        };

        match self.parser.parse(&class_file.bytes) {
            Ok(descriptor) => Some(Resolved {
                descriptor,
                component: class_file.component_id,
            }),
            Err(err) => {
                self.status.record(
                    side,
                    &class_file.component_id,
                    type_name,
                    format!("{} parse failed: {err}", self.parser.format_name()),
                );
                None
            }
        }
    }

    fn in_mask(&mut self, side: Side, resolved: &Resolved) -> bool {
        let annotations =
            self.annotations_in(side, &resolved.component, &resolved.descriptor.handle());
        self.mask.contains(annotations.visibility)
    }

    /// Superclass chain of `descriptor`, excluding `java.lang.Object`,
    /// keeping only ancestors inside the visibility mask.
    pub(super) fn ancestors(&mut self, side: Side, descriptor: &TypeDescriptor) -> Walk {
        let mut walk = Walk::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut next = descriptor.effective_super().map(str::to_string);
        while let Some(name) = next {
            if !seen.insert(name.clone()) {
                break;
            }
            let Some(resolved) = self.find_type(side, &name) else {
                walk.complete = false;
                break;
            };
            if self.in_mask(side, &resolved) {
                walk.types.insert(resolved.descriptor.clone());
            }
            next = resolved.descriptor.effective_super().map(str::to_string);
        }
        walk
    }

    /// Every interface `descriptor` and its ancestors implement, directly or
    /// through other interfaces, keeping only those inside the mask.
    pub(super) fn interfaces(&mut self, side: Side, descriptor: &TypeDescriptor) -> Walk {
        let mut walk = Walk::new();
        let mut seen = HashSet::new();
        self.collect_interfaces(side, descriptor, &mut walk, &mut seen);
        walk
    }

    fn collect_interfaces(
        &mut self,
        side: Side,
        descriptor: &TypeDescriptor,
        walk: &mut Walk,
        seen: &mut HashSet<String>,
    ) {
        for name in &descriptor.interfaces {
            if !seen.insert(name.clone()) {
                continue;
            }
            let Some(resolved) = self.find_type(side, name) else {
                walk.complete = false;
                continue;
            };
            if self.in_mask(side, &resolved) {
                walk.types.insert(resolved.descriptor.clone());
            }
            self.collect_interfaces(side, &resolved.descriptor, walk, seen);
        }
        if let Some(super_name) = descriptor.effective_super() {
            if !seen.insert(super_name.to_string()) {
                return;
            }
            match self.find_type(side, super_name) {
                Some(resolved) => self.collect_interfaces(side, &resolved.descriptor, walk, seen),
                None => walk.complete = false,
            }
        }
    }

    /// `java.lang.Object` as seen from the scope, if resolvable.
    pub(super) fn object_type(&mut self, side: Side) -> Option<Rc<Resolved>> {
        self.find_type(side, JAVA_LANG_OBJECT)
    }

    /// Whether a thrown type is checked.
    ///
    /// Walks the superclass chain looking for `RuntimeException` or `Error`.
    /// Any link that cannot be resolved makes the answer "checked".
    pub(super) fn is_checked_exception(&mut self, side: Side, type_name: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = type_name.to_string();
        loop {
            if current == JAVA_LANG_RUNTIME_EXCEPTION || current == JAVA_LANG_ERROR {
                return false;
            }
            if current == JAVA_LANG_OBJECT || !seen.insert(current.clone()) {
                return true;
            }
            let Some(resolved) = self.find_type(side, &current) else {
                return true;
            };
            match resolved.descriptor.super_name.as_deref() {
                Some(super_name) => current = super_name.to_string(),
                None => return true,
            }
        }
    }
}
