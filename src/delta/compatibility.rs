//! Binary compatibility verdicts for delta leaves.
//!
//! Verdicts come from a lookup table keyed by (scope, kind, flag). Lookups
//! try the exact scope, then the wildcard scope, then fall back to a
//! per-kind default.

use super::{Delta, DeltaFlag, DeltaKind, ElementType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Verdict recorded in the compatibility table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    Compatible,
    Breaking,
    /// Breaking only when the affected member is abstract in the new version
    BreakingIfAbstract,
}

impl Compatibility {
    const fn resolve(self, delta: &Delta) -> bool {
        match self {
            Self::Compatible => true,
            Self::Breaking => false,
            Self::BreakingIfAbstract => !delta.new_modifiers.is_abstract(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Scope {
    Any,
    Component,
    Class,
    Interface,
    Member,
}

impl Scope {
    const fn of(element_type: ElementType) -> Self {
        match element_type {
            ElementType::ApiBaseline | ElementType::ApiComponent => Self::Component,
            ElementType::Class | ElementType::Enum => Self::Class,
            ElementType::Interface | ElementType::Annotation => Self::Interface,
            ElementType::Field
            | ElementType::Method
            | ElementType::Constructor
            | ElementType::TypeParameter => Self::Member,
        }
    }
}

type Key = (Scope, DeltaKind, DeltaFlag);

use Compatibility::{Breaking, BreakingIfAbstract, Compatible};
use DeltaFlag as F;
use DeltaKind as K;

const TABLE: &[(Scope, DeltaKind, DeltaFlag, Compatibility)] = &[
    // additions
    (Scope::Any, K::Added, F::Superclass, Compatible),
    (Scope::Any, K::Added, F::Value, Breaking),
    (Scope::Any, K::Added, F::TypeParameter, Breaking),
    (Scope::Any, K::Added, F::ClassBound, Breaking),
    (Scope::Any, K::Added, F::InterfaceBound, Breaking),
    (Scope::Any, K::Added, F::InterfaceBounds, Breaking),
    (Scope::Any, K::Added, F::MethodWithoutDefaultValue, Breaking),
    (Scope::Any, K::Added, F::CheckedException, Breaking),
    (Scope::Interface, K::Added, F::Method, BreakingIfAbstract),
    (Scope::Any, K::AddedNotExtendRestrictionStatic, F::Method, Breaking),
    (Scope::Any, K::AddedNotImplementRestriction, F::Field, Compatible),
    (Scope::Any, K::AddedNotImplementRestriction, F::TypeMember, Compatible),
    (Scope::Any, K::AddedNotExtendRestriction, F::TypeMember, Compatible),
    (Scope::Component, K::Added, F::ApiComponent, Compatible),
    // removals
    (Scope::Any, K::Removed, F::FieldMovedUp, Compatible),
    (Scope::Any, K::Removed, F::MethodMovedUp, Compatible),
    (Scope::Any, K::Removed, F::CheckedException, Compatible),
    (Scope::Any, K::Removed, F::UncheckedException, Compatible),
    (Scope::Any, K::Removed, F::Clinit, Compatible),
    (Scope::Any, K::Removed, F::ApiType, Compatible),
    (Scope::Any, K::Removed, F::ApiField, Compatible),
    (Scope::Any, K::Removed, F::ApiEnumConstant, Compatible),
    (Scope::Any, K::Removed, F::ApiMethod, Compatible),
    (Scope::Any, K::Removed, F::ApiConstructor, Compatible),
    (Scope::Any, K::Removed, F::ApiMethodWithDefaultValue, Compatible),
    (Scope::Any, K::Removed, F::ApiMethodWithoutDefaultValue, Compatible),
    // changes
    (Scope::Class, K::Changed, F::ExpandedSuperclassSet, Compatible),
    (Scope::Class, K::Changed, F::ExpandedSuperinterfacesSet, Compatible),
    (Scope::Any, K::Changed, F::IncreaseAccess, Compatible),
    (Scope::Any, K::Changed, F::AbstractToNonAbstract, Compatible),
    (Scope::Any, K::Changed, F::FinalToNonFinal, Compatible),
    (Scope::Any, K::Changed, F::FinalToNonFinalNonStatic, Compatible),
    (Scope::Any, K::Changed, F::FinalToNonFinalStaticNonConstant, Compatible),
    (Scope::Any, K::Changed, F::TransientToNonTransient, Compatible),
    (Scope::Any, K::Changed, F::NonTransientToTransient, Compatible),
    (Scope::Any, K::Changed, F::VolatileToNonVolatile, Compatible),
    (Scope::Any, K::Changed, F::NonVolatileToVolatile, Compatible),
    (Scope::Any, K::Changed, F::NativeToNonNative, Compatible),
    (Scope::Any, K::Changed, F::NonNativeToNative, Compatible),
    (Scope::Any, K::Changed, F::SynchronizedToNonSynchronized, Compatible),
    (Scope::Any, K::Changed, F::NonSynchronizedToSynchronized, Compatible),
    (Scope::Any, K::Changed, F::ArrayToVarargs, Compatible),
    (Scope::Any, K::Changed, F::Value, Breaking),
    (Scope::Any, K::Changed, F::AnnotationDefaultValue, Compatible),
    (Scope::Any, K::Changed, F::Restrictions, Compatible),
];

fn table() -> &'static HashMap<Key, Compatibility> {
    static TABLE_INDEX: OnceLock<HashMap<Key, Compatibility>> = OnceLock::new();
    TABLE_INDEX.get_or_init(|| {
        TABLE
            .iter()
            .map(|&(scope, kind, flag, verdict)| ((scope, kind, flag), verdict))
            .collect()
    })
}

const fn kind_default(kind: DeltaKind) -> Compatibility {
    match kind {
        K::AddedNonVisible
        | K::RemovedNonVisible
        | K::ChangedNonVisible
        | K::AddedExtendRestriction
        | K::AddedImplementRestriction
        | K::AddedNotExtendRestrictionStatic
        | K::RemovedExtendRestriction
        | K::ChangedExtendRestriction
        | K::Added => Compatible,
        K::AddedNotExtendRestriction | K::AddedNotImplementRestriction => BreakingIfAbstract,
        K::Removed | K::Changed | K::ChangedNotExtendRestriction | K::ChangedVisibility => {
            Breaking
        }
    }
}

/// Table verdict for a classification, before modifiers are considered.
#[must_use]
pub fn lookup(element_type: ElementType, kind: DeltaKind, flag: DeltaFlag) -> Compatibility {
    let index = table();
    index
        .get(&(Scope::of(element_type), kind, flag))
        .or_else(|| index.get(&(Scope::Any, kind, flag)))
        .copied()
        .unwrap_or_else(|| kind_default(kind))
}

/// Whether a single delta leaf is binary compatible.
#[must_use]
pub fn is_compatible(delta: &Delta) -> bool {
    lookup(delta.element_type, delta.kind, delta.flag).resolve(delta)
}
