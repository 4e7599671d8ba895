//! Classification vocabulary of a delta: element type, kind and flag.
//!
//! Together the three values form the stable key external consumers use to
//! pick a message template or a compatibility verdict.

use crate::model::TypeCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Element Type
// ============================================================================

/// What kind of element a delta is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    ApiBaseline,
    ApiComponent,
    Annotation,
    Class,
    Enum,
    Interface,
    Field,
    Method,
    Constructor,
    TypeParameter,
}

impl ElementType {
    #[must_use]
    pub const fn of_category(category: TypeCategory) -> Self {
        match category {
            TypeCategory::Annotation => Self::Annotation,
            TypeCategory::Interface => Self::Interface,
            TypeCategory::Enum => Self::Enum,
            TypeCategory::Class => Self::Class,
        }
    }

    /// True for the four type-level element types.
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(
            self,
            Self::Annotation | Self::Class | Self::Enum | Self::Interface
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ApiBaseline => "API_BASELINE",
            Self::ApiComponent => "API_COMPONENT",
            Self::Annotation => "ANNOTATION",
            Self::Class => "CLASS",
            Self::Enum => "ENUM",
            Self::Interface => "INTERFACE",
            Self::Field => "FIELD",
            Self::Method => "METHOD",
            Self::Constructor => "CONSTRUCTOR",
            Self::TypeParameter => "TYPE_PARAMETER",
        }
    }
}

// ============================================================================
// Delta Kind
// ============================================================================

/// Direction of a change, optionally qualified by visibility or restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeltaKind {
    Added,
    Removed,
    Changed,
    AddedNonVisible,
    RemovedNonVisible,
    ChangedNonVisible,
    AddedExtendRestriction,
    AddedImplementRestriction,
    AddedNotExtendRestriction,
    AddedNotExtendRestrictionStatic,
    AddedNotImplementRestriction,
    ChangedExtendRestriction,
    ChangedNotExtendRestriction,
    RemovedExtendRestriction,
    ChangedVisibility,
}

/// Coarse direction shared by a family of kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindFamily {
    Added,
    Removed,
    Changed,
}

impl DeltaKind {
    #[must_use]
    pub const fn family(self) -> KindFamily {
        match self {
            Self::Added
            | Self::AddedNonVisible
            | Self::AddedExtendRestriction
            | Self::AddedImplementRestriction
            | Self::AddedNotExtendRestriction
            | Self::AddedNotExtendRestrictionStatic
            | Self::AddedNotImplementRestriction => KindFamily::Added,
            Self::Removed | Self::RemovedNonVisible | Self::RemovedExtendRestriction => {
                KindFamily::Removed
            }
            Self::Changed
            | Self::ChangedNonVisible
            | Self::ChangedExtendRestriction
            | Self::ChangedNotExtendRestriction
            | Self::ChangedVisibility => KindFamily::Changed,
        }
    }

    #[must_use]
    pub const fn is_non_visible(self) -> bool {
        matches!(
            self,
            Self::AddedNonVisible | Self::RemovedNonVisible | Self::ChangedNonVisible
        )
    }

    /// The non-visible counterpart of this kind's family.
    ///
    /// `ChangedVisibility` has no counterpart and is returned unchanged.
    #[must_use]
    pub const fn to_non_visible(self) -> Self {
        if matches!(self, Self::ChangedVisibility) {
            return self;
        }
        match self.family() {
            KindFamily::Added => Self::AddedNonVisible,
            KindFamily::Removed => Self::RemovedNonVisible,
            KindFamily::Changed => Self::ChangedNonVisible,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Added => "ADDED",
            Self::Removed => "REMOVED",
            Self::Changed => "CHANGED",
            Self::AddedNonVisible => "ADDED_NON_VISIBLE",
            Self::RemovedNonVisible => "REMOVED_NON_VISIBLE",
            Self::ChangedNonVisible => "CHANGED_NON_VISIBLE",
            Self::AddedExtendRestriction => "ADDED_EXTEND_RESTRICTION",
            Self::AddedImplementRestriction => "ADDED_IMPLEMENT_RESTRICTION",
            Self::AddedNotExtendRestriction => "ADDED_NOT_EXTEND_RESTRICTION",
            Self::AddedNotExtendRestrictionStatic => "ADDED_NOT_EXTEND_RESTRICTION_STATIC",
            Self::AddedNotImplementRestriction => "ADDED_NOT_IMPLEMENT_RESTRICTION",
            Self::ChangedExtendRestriction => "CHANGED_EXTEND_RESTRICTION",
            Self::ChangedNotExtendRestriction => "CHANGED_NOT_EXTEND_RESTRICTION",
            Self::RemovedExtendRestriction => "REMOVED_EXTEND_RESTRICTION",
            Self::ChangedVisibility => "CHANGED_VISIBILITY",
        }
    }
}

// ============================================================================
// Delta Flag
// ============================================================================

/// Fine-grained sub-category of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeltaFlag {
    // Hierarchy
    Superclass,
    ContractedSuperclassSet,
    ExpandedSuperclassSet,
    ContractedSuperinterfacesSet,
    ExpandedSuperinterfacesSet,
    // Access and modifiers
    DecreaseAccess,
    IncreaseAccess,
    AbstractToNonAbstract,
    NonAbstractToAbstract,
    FinalToNonFinal,
    FinalToNonFinalNonStatic,
    FinalToNonFinalStaticConstant,
    FinalToNonFinalStaticNonConstant,
    NonFinalToFinal,
    StaticToNonStatic,
    NonStaticToStatic,
    TransientToNonTransient,
    NonTransientToTransient,
    VolatileToNonVolatile,
    NonVolatileToVolatile,
    NativeToNonNative,
    NonNativeToNative,
    SynchronizedToNonSynchronized,
    NonSynchronizedToSynchronized,
    // Category conversion
    ToAnnotation,
    ToClass,
    ToEnum,
    ToInterface,
    // Members
    Field,
    Method,
    Constructor,
    EnumConstant,
    Clinit,
    TypeMember,
    FieldMovedUp,
    MethodMovedUp,
    MethodMovedDown,
    OverridenMethod,
    MethodWithDefaultValue,
    MethodWithoutDefaultValue,
    AnnotationDefaultValue,
    Value,
    Type,
    // Exceptions and parameters
    CheckedException,
    UncheckedException,
    VarargsToArray,
    ArrayToVarargs,
    // Generics
    TypeParameters,
    TypeParameter,
    TypeArguments,
    TypeParameterName,
    ClassBound,
    InterfaceBound,
    InterfaceBounds,
    // Owner annotations
    Restrictions,
    TypeVisibility,
    ApiType,
    ApiField,
    ApiEnumConstant,
    ApiMethod,
    ApiConstructor,
    ApiMethodWithDefaultValue,
    ApiMethodWithoutDefaultValue,
    // Component and baseline level
    ExecutionEnvironment,
    ApiComponent,
}

impl DeltaFlag {
    /// Flag reporting a change of category to `category`.
    #[must_use]
    pub const fn to_category(category: TypeCategory) -> Self {
        match category {
            TypeCategory::Annotation => Self::ToAnnotation,
            TypeCategory::Interface => Self::ToInterface,
            TypeCategory::Enum => Self::ToEnum,
            TypeCategory::Class => Self::ToClass,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Superclass => "SUPERCLASS",
            Self::ContractedSuperclassSet => "CONTRACTED_SUPERCLASS_SET",
            Self::ExpandedSuperclassSet => "EXPANDED_SUPERCLASS_SET",
            Self::ContractedSuperinterfacesSet => "CONTRACTED_SUPERINTERFACES_SET",
            Self::ExpandedSuperinterfacesSet => "EXPANDED_SUPERINTERFACES_SET",
            Self::DecreaseAccess => "DECREASE_ACCESS",
            Self::IncreaseAccess => "INCREASE_ACCESS",
            Self::AbstractToNonAbstract => "ABSTRACT_TO_NON_ABSTRACT",
            Self::NonAbstractToAbstract => "NON_ABSTRACT_TO_ABSTRACT",
            Self::FinalToNonFinal => "FINAL_TO_NON_FINAL",
            Self::FinalToNonFinalNonStatic => "FINAL_TO_NON_FINAL_NON_STATIC",
            Self::FinalToNonFinalStaticConstant => "FINAL_TO_NON_FINAL_STATIC_CONSTANT",
            Self::FinalToNonFinalStaticNonConstant => "FINAL_TO_NON_FINAL_STATIC_NON_CONSTANT",
            Self::NonFinalToFinal => "NON_FINAL_TO_FINAL",
            Self::StaticToNonStatic => "STATIC_TO_NON_STATIC",
            Self::NonStaticToStatic => "NON_STATIC_TO_STATIC",
            Self::TransientToNonTransient => "TRANSIENT_TO_NON_TRANSIENT",
            Self::NonTransientToTransient => "NON_TRANSIENT_TO_TRANSIENT",
            Self::VolatileToNonVolatile => "VOLATILE_TO_NON_VOLATILE",
            Self::NonVolatileToVolatile => "NON_VOLATILE_TO_VOLATILE",
            Self::NativeToNonNative => "NATIVE_TO_NON_NATIVE",
            Self::NonNativeToNative => "NON_NATIVE_TO_NATIVE",
            Self::SynchronizedToNonSynchronized => "SYNCHRONIZED_TO_NON_SYNCHRONIZED",
            Self::NonSynchronizedToSynchronized => "NON_SYNCHRONIZED_TO_SYNCHRONIZED",
            Self::ToAnnotation => "TO_ANNOTATION",
            Self::ToClass => "TO_CLASS",
            Self::ToEnum => "TO_ENUM",
            Self::ToInterface => "TO_INTERFACE",
            Self::Field => "FIELD",
            Self::Method => "METHOD",
            Self::Constructor => "CONSTRUCTOR",
            Self::EnumConstant => "ENUM_CONSTANT",
            Self::Clinit => "CLINIT",
            Self::TypeMember => "TYPE_MEMBER",
            Self::FieldMovedUp => "FIELD_MOVED_UP",
            Self::MethodMovedUp => "METHOD_MOVED_UP",
            Self::MethodMovedDown => "METHOD_MOVED_DOWN",
            Self::OverridenMethod => "OVERRIDEN_METHOD",
            Self::MethodWithDefaultValue => "METHOD_WITH_DEFAULT_VALUE",
            Self::MethodWithoutDefaultValue => "METHOD_WITHOUT_DEFAULT_VALUE",
            Self::AnnotationDefaultValue => "ANNOTATION_DEFAULT_VALUE",
            Self::Value => "VALUE",
            Self::Type => "TYPE",
            Self::CheckedException => "CHECKED_EXCEPTION",
            Self::UncheckedException => "UNCHECKED_EXCEPTION",
            Self::VarargsToArray => "VARARGS_TO_ARRAY",
            Self::ArrayToVarargs => "ARRAY_TO_VARARGS",
            Self::TypeParameters => "TYPE_PARAMETERS",
            Self::TypeParameter => "TYPE_PARAMETER",
            Self::TypeArguments => "TYPE_ARGUMENTS",
            Self::TypeParameterName => "TYPE_PARAMETER_NAME",
            Self::ClassBound => "CLASS_BOUND",
            Self::InterfaceBound => "INTERFACE_BOUND",
            Self::InterfaceBounds => "INTERFACE_BOUNDS",
            Self::Restrictions => "RESTRICTIONS",
            Self::TypeVisibility => "TYPE_VISIBILITY",
            Self::ApiType => "API_TYPE",
            Self::ApiField => "API_FIELD",
            Self::ApiEnumConstant => "API_ENUM_CONSTANT",
            Self::ApiMethod => "API_METHOD",
            Self::ApiConstructor => "API_CONSTRUCTOR",
            Self::ApiMethodWithDefaultValue => "API_METHOD_WITH_DEFAULT_VALUE",
            Self::ApiMethodWithoutDefaultValue => "API_METHOD_WITHOUT_DEFAULT_VALUE",
            Self::ExecutionEnvironment => "EXECUTION_ENVIRONMENT",
            Self::ApiComponent => "API_COMPONENT",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for DeltaFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
