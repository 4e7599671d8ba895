//! Per-pair comparison state and the top-level comparison steps.
//!
//! A [`TypeComparison`] lives for one call into the comparator. It owns the
//! lookup cache and the status; each compared type (the requested pair plus
//! any nested member types) gets its own [`Frame`] collecting deltas.
//! Member-level steps live in sibling modules as further `impl` blocks.

use super::status::{ComparisonStatus, Side};
use super::ComparisonScope;
use crate::delta::{Delta, DeltaFlag, DeltaKind, ElementType, KindFamily, RestrictionState};
use crate::model::{
    AccessFlags, AccessTier, ApiAnnotations, Restrictions, TypeDescriptor, Visibility,
    VisibilityMask,
};
use crate::parsers::ClassFileParser;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

// ============================================================================
// Affected member
// ============================================================================

/// Access of the member a delta is about, used by the visibility normalizer.
#[derive(Debug, Clone, Copy)]
pub(super) struct Affected {
    old: AccessFlags,
    new: AccessFlags,
    constructor: bool,
    /// Never rewritten to a non-visible kind
    pinned: bool,
}

impl Affected {
    pub(super) const fn member(old: AccessFlags, new: AccessFlags) -> Self {
        Self {
            old,
            new,
            constructor: false,
            pinned: false,
        }
    }

    /// A member present in only one version.
    pub(super) const fn single(access: AccessFlags) -> Self {
        Self::member(access, access)
    }

    pub(super) const fn constructor(mut self, constructor: bool) -> Self {
        self.constructor = constructor;
        self
    }

    pub(super) const fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// Whether a delta of `kind` about this member cannot affect clients.
    ///
    /// Changes count only when the member is hidden in both versions, so
    /// narrowing a public member to private stays visible.
    const fn is_hidden(self, kind: DeltaKind) -> bool {
        match kind.family() {
            KindFamily::Added => !self.new.is_visible(),
            KindFamily::Removed => !self.old.is_visible(),
            KindFamily::Changed => !self.old.is_visible() && !self.new.is_visible(),
        }
    }
}

// ============================================================================
// Frame
// ============================================================================

/// Deltas and restriction state for one compared type.
pub(super) struct Frame<'t> {
    pub(super) old: &'t TypeDescriptor,
    pub(super) new: &'t TypeDescriptor,
    pub(super) element_type: ElementType,
    /// Restrictions of the old type, with `final` counted as no-extend
    pub(super) old_restrictions: Restrictions,
    /// Restrictions of the new type, with `final` counted as no-extend
    pub(super) new_restrictions: Restrictions,
    component: String,
    pub(super) deltas: Vec<Delta>,
}

impl<'t> Frame<'t> {
    fn new(
        old: &'t TypeDescriptor,
        new: &'t TypeDescriptor,
        old_annotations: ApiAnnotations,
        new_annotations: ApiAnnotations,
        component: &str,
    ) -> Self {
        Self {
            old,
            new,
            element_type: ElementType::of_category(old.category()),
            old_restrictions: with_final(old_annotations.restrictions, old.access),
            new_restrictions: with_final(new_annotations.restrictions, new.access),
            component: component.to_string(),
            deltas: Vec::new(),
        }
    }

    /// Source-style name of the compared type, nested types joined by `.`.
    pub(super) fn display_name(&self) -> String {
        self.new.name.replace('$', ".")
    }

    pub(super) fn type_affected(&self) -> Affected {
        Affected::member(self.old.access, self.new.access)
    }

    /// Record a delta from the structural steps, applying the visibility
    /// normalizer.
    pub(super) fn add(
        &mut self,
        element_type: ElementType,
        kind: DeltaKind,
        flag: DeltaFlag,
        affected: Affected,
        key: impl Into<String>,
        arguments: Vec<String>,
    ) {
        let kind = if !affected.pinned && flag != DeltaFlag::Clinit && affected.is_hidden(kind) {
            kind.to_non_visible()
        } else {
            kind
        };
        let flag = if flag == DeltaFlag::Method && affected.constructor {
            DeltaFlag::Constructor
        } else {
            flag
        };
        self.push(element_type, kind, flag, affected.old, affected.new, key, arguments);
    }

    /// Record a type-level delta as is.
    pub(super) fn add_type_delta(&mut self, kind: DeltaKind, flag: DeltaFlag) {
        let (old, new) = (self.old.access, self.new.access);
        let key = self.new.name.clone();
        let arguments = vec![self.display_name()];
        self.push(self.element_type, kind, flag, old, new, key, arguments);
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        element_type: ElementType,
        kind: DeltaKind,
        flag: DeltaFlag,
        old_modifiers: AccessFlags,
        new_modifiers: AccessFlags,
        key: impl Into<String>,
        arguments: Vec<String>,
    ) {
        let delta = Delta::new(element_type, kind, flag, self.new.name.as_str(), key)
            .with_restrictions(RestrictionState::new(
                self.new_restrictions,
                self.old_restrictions,
            ))
            .with_modifiers(old_modifiers, new_modifiers)
            .with_component(Some(&self.component))
            .with_arguments(arguments);
        tracing::debug!(
            element = %delta.element_type,
            kind = %delta.kind,
            flag = %delta.flag,
            key = %delta.key,
            "delta"
        );
        self.deltas.push(delta);
    }
}

fn with_final(restrictions: Restrictions, access: AccessFlags) -> Restrictions {
    if access.is_final() {
        restrictions | Restrictions::NO_EXTEND
    } else {
        restrictions
    }
}

// ============================================================================
// Comparison session
// ============================================================================

/// A resolved type and the component it was found in.
pub(super) struct Resolved {
    pub(super) descriptor: TypeDescriptor,
    pub(super) component: String,
}

/// State shared by every frame of one comparison.
pub(super) struct TypeComparison<'a> {
    pub(super) parser: &'a dyn ClassFileParser,
    old_scope: ComparisonScope<'a>,
    new_scope: ComparisonScope<'a>,
    pub(super) mask: VisibilityMask,
    pub(super) status: ComparisonStatus,
    pub(super) cache: HashMap<(Side, String), Option<Rc<Resolved>>>,
    in_progress: HashSet<String>,
}

impl<'a> TypeComparison<'a> {
    pub(super) fn new(
        parser: &'a dyn ClassFileParser,
        old_scope: ComparisonScope<'a>,
        new_scope: ComparisonScope<'a>,
        mask: VisibilityMask,
    ) -> Self {
        Self {
            parser,
            old_scope,
            new_scope,
            mask,
            status: ComparisonStatus::default(),
            cache: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    pub(super) const fn scope(&self, side: Side) -> ComparisonScope<'a> {
        match side {
            Side::Old => self.old_scope,
            Side::New => self.new_scope,
        }
    }

    pub(super) fn into_status(self) -> ComparisonStatus {
        self.status
    }

    /// Compare one pair of types and return its deltas, in step order.
    pub(super) fn compare_types(&mut self, old: &TypeDescriptor, new: &TypeDescriptor) -> Vec<Delta> {
        if !self.in_progress.insert(new.name.clone()) {
            tracing::debug!(type_name = %new.name, "type already being compared, skipping");
            return Vec::new();
        }
        let deltas = self.compare_in_frame(old, new);
        self.in_progress.remove(&new.name);
        deltas
    }

    fn compare_in_frame(&mut self, old: &TypeDescriptor, new: &TypeDescriptor) -> Vec<Delta> {
        let new_annotations = self.annotations(Side::New, &new.handle());
        let old_annotations = self.annotations(Side::Old, &old.handle());
        let component = self.new_scope.component;
        let mut frame = Frame::new(old, new, old_annotations, new_annotations, component);

        // visibility gate
        if !self.mask.contains(new_annotations.visibility) {
            if old_annotations.visibility == Visibility::Api && self.mask.includes_api() {
                frame.add_type_delta(DeltaKind::Removed, DeltaFlag::Type);
                return frame.deltas;
            }
            if !self.mask.contains(old_annotations.visibility) {
                return Vec::new();
            }
            frame.add_type_delta(DeltaKind::ChangedVisibility, DeltaFlag::Type);
            return frame.deltas;
        }

        if old_annotations.restrictions != new_annotations.restrictions {
            frame.add_type_delta(DeltaKind::Changed, DeltaFlag::Restrictions);
        }
        if let Some(flag) = access_transition(old.access, new.access) {
            frame.add_type_delta(DeltaKind::Changed, flag);
        }

        if self.mask.is_api_only() && !new.access.is_visible() {
            return frame.deltas;
        }

        let (old_category, new_category) = (old.category(), new.category());
        if old_category != new_category {
            frame.deltas.clear();
            frame.add_type_delta(DeltaKind::Changed, DeltaFlag::to_category(new_category));
            return frame.deltas;
        }

        self.compare_type_static(&mut frame);
        self.compare_hierarchy(&mut frame);
        self.compare_fields(&mut frame);
        self.compare_methods(&mut frame);
        self.compare_type_modifiers(&mut frame);

        let affected = frame.type_affected();
        let subject = super::generics::Subject {
            element_type: frame.element_type,
            key: new.name.clone(),
            arguments: vec![frame.display_name()],
            affected,
        };
        self.compare_signatures(&mut frame, old.signature.as_deref(), new.signature.as_deref(), &subject);

        self.compare_member_types(&mut frame);
        frame.deltas
    }

    fn compare_type_static(&self, frame: &mut Frame<'_>) {
        let (old, new) = (frame.old.access, frame.new.access);
        let flag = match (old.is_static(), new.is_static()) {
            (true, false) => DeltaFlag::StaticToNonStatic,
            (false, true) => DeltaFlag::NonStaticToStatic,
            _ => return,
        };
        let (element_type, affected, key, arguments) = type_subject(frame);
        frame.add(element_type, DeltaKind::Changed, flag, affected, key, arguments);
    }

    fn compare_type_modifiers(&self, frame: &mut Frame<'_>) {
        let (old, new) = (frame.old.access, frame.new.access);
        let mut flags = Vec::new();
        match (old.is_abstract(), new.is_abstract()) {
            (true, false) => flags.push(DeltaFlag::AbstractToNonAbstract),
            (false, true) => flags.push(DeltaFlag::NonAbstractToAbstract),
            _ => {}
        }
        match (old.is_final(), new.is_final()) {
            (true, false) => flags.push(DeltaFlag::FinalToNonFinal),
            (false, true) => flags.push(DeltaFlag::NonFinalToFinal),
            _ => {}
        }
        for flag in flags {
            let (element_type, affected, key, arguments) = type_subject(frame);
            frame.add(element_type, DeltaKind::Changed, flag, affected, key, arguments);
        }
    }
}

fn type_subject(frame: &Frame<'_>) -> (ElementType, Affected, String, Vec<String>) {
    (
        frame.element_type,
        frame.type_affected(),
        frame.new.name.clone(),
        vec![frame.display_name()],
    )
}

/// DECREASE_ACCESS or INCREASE_ACCESS when the access tier moved.
pub(super) fn access_transition(old: AccessFlags, new: AccessFlags) -> Option<DeltaFlag> {
    let (old, new) = (AccessTier::of(old), AccessTier::of(new));
    if new < old {
        Some(DeltaFlag::DecreaseAccess)
    } else if new > old {
        Some(DeltaFlag::IncreaseAccess)
    } else {
        None
    }
}
