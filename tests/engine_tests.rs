//! Integration tests for the type comparison engine.

use apidiff::compare::ComparisonScope;
use apidiff::model::{
    AccessFlags, ApiAnnotations, ApiBaseline, ApiComponent, ConstantValue, ElementHandle,
    FieldDescriptor, MemberTypeDescriptor, MethodDescriptor, Restrictions, TypeDescriptor,
    Visibility, VisibilityMask,
};
use apidiff::{ApiComparator, Comparison, DeltaFlag, DeltaKind, DeltaOutcome, ElementType};

const PUBLIC: u32 = AccessFlags::PUBLIC;
const PROTECTED: u32 = AccessFlags::PROTECTED;
const INTERFACE: u32 = AccessFlags::PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT;
const CONSTANT: u32 = AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL;

type Leaf = (ElementType, DeltaKind, DeltaFlag, String);

// ============================================================================
// Helpers
// ============================================================================

/// A baseline with one `core` component plus a `jre` system component.
struct Fixture {
    core: ApiComponent,
    jre: ApiComponent,
}

impl Fixture {
    fn new() -> Self {
        Self {
            core: ApiComponent::new("core"),
            jre: ApiComponent::new("jre").as_system(),
        }
    }

    fn with_type(mut self, descriptor: &TypeDescriptor) -> Self {
        self.core.add_type(descriptor).unwrap();
        self
    }

    fn with_system_type(mut self, descriptor: &TypeDescriptor) -> Self {
        self.jre.add_type(descriptor).unwrap();
        self
    }

    fn with_annotations(mut self, handle: &ElementHandle, annotations: ApiAnnotations) -> Self {
        self.core.annotate(handle, annotations);
        self
    }

    fn with_restrictions(self, descriptor: &TypeDescriptor, restrictions: Restrictions) -> Self {
        self.with_annotations(
            &descriptor.handle(),
            ApiAnnotations::new(Visibility::Api, restrictions),
        )
    }

    fn with_visibility(self, descriptor: &TypeDescriptor, visibility: Visibility) -> Self {
        self.with_annotations(
            &descriptor.handle(),
            ApiAnnotations::new(visibility, Restrictions::NONE),
        )
    }

    fn build(self) -> ApiBaseline {
        ApiBaseline::new("fixture")
            .with_component(self.core)
            .with_component(self.jre)
    }
}

fn compare_in(
    old: &TypeDescriptor,
    new: &TypeDescriptor,
    old_baseline: &ApiBaseline,
    new_baseline: &ApiBaseline,
) -> Comparison {
    compare_masked(old, new, old_baseline, new_baseline, VisibilityMask::API)
}

fn compare_masked(
    old: &TypeDescriptor,
    new: &TypeDescriptor,
    old_baseline: &ApiBaseline,
    new_baseline: &ApiBaseline,
    mask: VisibilityMask,
) -> Comparison {
    ApiComparator::new().compare_with_status(
        old,
        new,
        ComparisonScope::new(old_baseline, "core"),
        ComparisonScope::new(new_baseline, "core"),
        mask,
    )
}

/// Compare `old` and `new`, each added to its own fixture.
fn compare_fixtures(
    old: &TypeDescriptor,
    new: &TypeDescriptor,
    old_fixture: Fixture,
    new_fixture: Fixture,
) -> Comparison {
    let old_baseline = old_fixture.with_type(old).build();
    let new_baseline = new_fixture.with_type(new).build();
    compare_in(old, new, &old_baseline, &new_baseline)
}

fn compare(old: &TypeDescriptor, new: &TypeDescriptor) -> Comparison {
    compare_fixtures(old, new, Fixture::new(), Fixture::new())
}

fn tuples(outcome: &DeltaOutcome) -> Vec<Leaf> {
    outcome
        .leaves()
        .iter()
        .map(|d| (d.element_type, d.kind, d.flag, d.key.clone()))
        .collect()
}

fn leaf(element_type: ElementType, kind: DeltaKind, flag: DeltaFlag, key: &str) -> Leaf {
    (element_type, kind, flag, key.to_string())
}

fn class(name: &str) -> TypeDescriptor {
    TypeDescriptor::new(name, PUBLIC)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn exception_swap_reports_checked_removal_and_unchecked_addition() {
    let old = class("p.A").with_super("java.lang.Object").with_method(
        MethodDescriptor::new("m", PROTECTED, "()V").with_exceptions(["java.io.IOException"]),
    );
    let new = class("p.A").with_super("java.lang.Object").with_method(
        MethodDescriptor::new("m", PROTECTED, "()V")
            .with_exceptions(["java.lang.IllegalStateException"]),
    );
    let illegal_state = TypeDescriptor::new("java.lang.IllegalStateException", PUBLIC)
        .with_super("java.lang.RuntimeException");

    let comparison = compare_fixtures(
        &old,
        &new,
        Fixture::new(),
        Fixture::new().with_system_type(&illegal_state),
    );

    assert_eq!(
        tuples(&comparison.outcome),
        vec![
            leaf(ElementType::Method, DeltaKind::Removed, DeltaFlag::CheckedException, "m()V"),
            leaf(ElementType::Method, DeltaKind::Added, DeltaFlag::UncheckedException, "m()V"),
        ]
    );
}

#[test]
fn interface_method_addition_is_not_implement_restricted() {
    let old = TypeDescriptor::new("p.I", INTERFACE).with_method(MethodDescriptor::new(
        "f",
        PUBLIC | AccessFlags::ABSTRACT,
        "()V",
    ));
    let new = old.clone().with_method(MethodDescriptor::new(
        "g",
        PUBLIC | AccessFlags::ABSTRACT,
        "()V",
    ));

    let comparison = compare(&old, &new);
    assert_eq!(
        tuples(&comparison.outcome),
        vec![leaf(
            ElementType::Interface,
            DeltaKind::AddedNotImplementRestriction,
            DeltaFlag::Method,
            "g()V"
        )]
    );
}

#[test]
fn removed_constant_field_is_breaking() {
    let old = class("p.A").with_field(
        FieldDescriptor::new("X", CONSTANT, "I").with_value(ConstantValue::Integer(1)),
    );
    let new = class("p.A");

    let comparison = compare(&old, &new);
    assert_eq!(
        tuples(&comparison.outcome),
        vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::Field, "X")]
    );
    assert!(!comparison.is_compatible());
}

#[test]
fn superclass_added() {
    let old = class("p.A").with_super("java.lang.Object");
    let new = class("p.A").with_super("p.B");
    let base = class("p.B").with_super("java.lang.Object");

    let comparison = compare_fixtures(&old, &new, Fixture::new(), Fixture::new().with_type(&base));

    assert_eq!(
        tuples(&comparison.outcome),
        vec![leaf(ElementType::Class, DeltaKind::Added, DeltaFlag::Superclass, "p.A")]
    );
    assert!(comparison.status.is_ok());
    assert!(comparison.is_compatible());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn identical_types_compare_to_no_delta_under_any_mask() {
    let t = class("p.A")
        .with_signature("<T:Ljava/lang/Object;>Ljava/lang/Object;")
        .with_field(FieldDescriptor::new("f", PROTECTED, "I"))
        .with_method(MethodDescriptor::new("<init>", PUBLIC, "()V"))
        .with_method(MethodDescriptor::new("m", PUBLIC, "(I)V").with_exceptions(["p.E"]))
        .with_method(MethodDescriptor::new("m", PUBLIC, "(J)V"));
    let baseline = Fixture::new().with_type(&t).build();
    let scope = ComparisonScope::new(&baseline, "core");

    for mask in [VisibilityMask::API, VisibilityMask::API_SPI, VisibilityMask::ALL] {
        let outcome = ApiComparator::new().compare(&t, &t.clone(), scope, scope, mask);
        assert!(outcome.is_no_delta(), "mask {mask:?} produced {outcome:?}");
    }
}

#[test]
fn category_conversion_is_the_only_child() {
    let old = class("p.A")
        .with_field(FieldDescriptor::new("f", PUBLIC, "I"))
        .with_method(MethodDescriptor::new("m", PUBLIC, "()V"));
    let new = TypeDescriptor::new("p.A", PUBLIC | AccessFlags::ENUM | AccessFlags::FINAL)
        .with_super("java.lang.Enum")
        .with_method(MethodDescriptor::new("n", PUBLIC, "()V"));

    let comparison = compare(&old, &new);
    assert_eq!(
        tuples(&comparison.outcome),
        vec![leaf(ElementType::Class, DeltaKind::Changed, DeltaFlag::ToEnum, "p.A")]
    );
}

#[test]
fn protected_method_added_to_extend_restricted_class_is_qualified() {
    let old = class("p.A");
    let new = old
        .clone()
        .with_method(MethodDescriptor::new("hook", PROTECTED, "()V"));

    let comparison = compare_fixtures(
        &old,
        &new,
        Fixture::new().with_restrictions(&old, Restrictions::NO_EXTEND),
        Fixture::new().with_restrictions(&new, Restrictions::NO_EXTEND),
    );

    let leaves = comparison.outcome.leaves();
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].kind, DeltaKind::AddedExtendRestriction);
    assert_ne!(leaves[0].kind, DeltaKind::Added);
    assert!(comparison.is_compatible());
}

#[test]
fn comparator_is_reusable_across_comparisons() {
    let comparator = ApiComparator::new();
    let old = class("p.A").with_field(FieldDescriptor::new("f", PUBLIC, "I"));
    let new = class("p.A");
    let old_baseline = Fixture::new().with_type(&old).build();
    let new_baseline = Fixture::new().with_type(&new).build();
    let old_scope = ComparisonScope::new(&old_baseline, "core");
    let new_scope = ComparisonScope::new(&new_baseline, "core");

    let first = comparator.compare(&old, &new, old_scope, new_scope, VisibilityMask::API);
    let second = comparator.compare(&old, &new, old_scope, new_scope, VisibilityMask::API);
    assert_eq!(first, second);
    assert_eq!(old.fields.len(), 1);
}

// ============================================================================
// Visibility Gate
// ============================================================================

mod visibility_gate {
    use super::*;

    #[test]
    fn api_type_made_private_is_removed() {
        let t = class("p.A");
        let old_baseline = Fixture::new().with_type(&t).build();
        let new_baseline = Fixture::new()
            .with_type(&t)
            .with_visibility(&t, Visibility::Private)
            .build();

        let comparison = compare_in(&t, &t, &old_baseline, &new_baseline);
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::Type, "p.A")]
        );
    }

    #[test]
    fn spi_type_made_private_changes_visibility() {
        let t = class("p.A").with_method(MethodDescriptor::new("m", PUBLIC, "()V"));
        let new = class("p.A");
        let old_baseline = Fixture::new()
            .with_type(&t)
            .with_visibility(&t, Visibility::Spi)
            .build();
        let new_baseline = Fixture::new()
            .with_type(&new)
            .with_visibility(&new, Visibility::Private)
            .build();

        let comparison =
            compare_masked(&t, &new, &old_baseline, &new_baseline, VisibilityMask::API_SPI);
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Class,
                DeltaKind::ChangedVisibility,
                DeltaFlag::Type,
                "p.A"
            )]
        );
    }

    #[test]
    fn types_outside_the_mask_in_both_versions_are_skipped() {
        let old = class("p.A");
        let new = class("p.A").with_method(MethodDescriptor::new("m", PUBLIC, "()V"));
        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_visibility(&old, Visibility::Private),
            Fixture::new().with_visibility(&new, Visibility::Private),
        );
        assert!(comparison.outcome.is_no_delta());
    }
}

// ============================================================================
// Hierarchy
// ============================================================================

mod hierarchy {
    use super::*;

    #[test]
    fn expanded_superclass_set() {
        let base = class("p.B");
        let middle = class("p.C").with_super("p.B");
        let old = class("p.A").with_super("p.B");
        let new = class("p.A").with_super("p.C");

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_type(&base),
            Fixture::new().with_type(&base).with_type(&middle),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Class,
                DeltaKind::Changed,
                DeltaFlag::ExpandedSuperclassSet,
                "p.A"
            )]
        );
        assert!(comparison.is_compatible());
    }

    #[test]
    fn contracted_superclass_set() {
        let base = class("p.B");
        let middle = class("p.C").with_super("p.B");
        let old = class("p.A").with_super("p.C");
        let new = class("p.A").with_super("p.B");

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_type(&base).with_type(&middle),
            Fixture::new().with_type(&base),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Class,
                DeltaKind::Changed,
                DeltaFlag::ContractedSuperclassSet,
                "p.A"
            )]
        );
        assert!(!comparison.is_compatible());
    }

    #[test]
    fn superclass_dropped_is_changed() {
        let base = class("p.B");
        let old = class("p.A").with_super("p.B");
        let new = class("p.A").with_super("java.lang.Object");

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_type(&base),
            Fixture::new().with_type(&base),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Changed, DeltaFlag::Superclass, "p.A")]
        );
    }

    #[test]
    fn first_interface_expands_the_set() {
        let listener = TypeDescriptor::new("p.I", INTERFACE);
        let old = class("p.A");
        let new = class("p.A").with_interface("p.I");

        let comparison =
            compare_fixtures(&old, &new, Fixture::new(), Fixture::new().with_type(&listener));
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Class,
                DeltaKind::Changed,
                DeltaFlag::ExpandedSuperinterfacesSet,
                "p.A"
            )]
        );
    }

    #[test]
    fn last_interface_removed_contracts_the_set() {
        let listener = TypeDescriptor::new("p.I", INTERFACE);
        let old = class("p.A").with_interface("p.I");
        let new = class("p.A");

        let comparison =
            compare_fixtures(&old, &new, Fixture::new().with_type(&listener), Fixture::new());
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Class,
                DeltaKind::Changed,
                DeltaFlag::ContractedSuperinterfacesSet,
                "p.A"
            )]
        );
        assert!(!comparison.is_compatible());
    }

    #[test]
    fn inherited_superinterfaces_are_counted() {
        let base = TypeDescriptor::new("p.I", INTERFACE);
        let derived = TypeDescriptor::new("p.J", INTERFACE).with_interface("p.I");
        let old = class("p.A").with_interface("p.I");
        let new = class("p.A").with_interface("p.J");

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_type(&base),
            Fixture::new().with_type(&base).with_type(&derived),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Class,
                DeltaKind::Changed,
                DeltaFlag::ExpandedSuperinterfacesSet,
                "p.A"
            )]
        );
    }

    #[test]
    fn unresolvable_ancestor_skips_the_check() {
        let base = class("p.B");
        let old = class("p.A").with_super("p.Missing");
        let new = class("p.A").with_super("p.B");

        let comparison = compare_fixtures(&old, &new, Fixture::new(), Fixture::new().with_type(&base));
        assert!(comparison.outcome.is_no_delta());
        assert!(!comparison.status.is_ok());
    }
}

// ============================================================================
// Generic Signatures
// ============================================================================

mod generics {
    use super::*;

    const ONE_PARAMETER: &str = "<T:Ljava/lang/Object;>Ljava/lang/Object;";

    fn generic(signature: &str) -> TypeDescriptor {
        class("p.A").with_signature(signature)
    }

    fn parameter_leaves(old: &str, new: &str) -> Vec<Leaf> {
        tuples(&compare(&generic(old), &generic(new)).outcome)
    }

    #[test]
    fn type_parameters_added_and_removed() {
        let plain = class("p.A");
        let generic = generic(ONE_PARAMETER);

        assert_eq!(
            tuples(&compare(&plain, &generic).outcome),
            vec![leaf(ElementType::Class, DeltaKind::Added, DeltaFlag::TypeParameters, "p.A")]
        );
        assert_eq!(
            tuples(&compare(&generic, &plain).outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::TypeParameters, "p.A")]
        );
    }

    #[test]
    fn type_arguments_added_to_field() {
        let old = class("p.A").with_field(FieldDescriptor::new("names", PUBLIC, "Ljava/util/List;"));
        let new = class("p.A").with_field(
            FieldDescriptor::new("names", PUBLIC, "Ljava/util/List;")
                .with_signature("Ljava/util/List<Ljava/lang/String;>;"),
        );

        assert_eq!(
            tuples(&compare(&old, &new).outcome),
            vec![leaf(ElementType::Field, DeltaKind::Added, DeltaFlag::TypeArguments, "names")]
        );
    }

    #[test]
    fn changed_type_arguments_are_a_type_change() {
        let field = |signature: &str| {
            class("p.A").with_field(
                FieldDescriptor::new("names", PUBLIC, "Ljava/util/List;").with_signature(signature),
            )
        };
        let old = field("Ljava/util/List<Ljava/lang/String;>;");
        let new = field("Ljava/util/List<Ljava/lang/Integer;>;");

        assert_eq!(
            tuples(&compare(&old, &new).outcome),
            vec![leaf(ElementType::Field, DeltaKind::Changed, DeltaFlag::Type, "names")]
        );
    }

    #[test]
    fn parameter_count_change_is_reported_once() {
        let two = "<T:Ljava/lang/Object;U:Ljava/lang/Object;>Ljava/lang/Object;";
        assert_eq!(
            parameter_leaves(ONE_PARAMETER, two),
            vec![leaf(ElementType::Class, DeltaKind::Added, DeltaFlag::TypeParameter, "p.A")]
        );
        assert_eq!(
            parameter_leaves(two, ONE_PARAMETER),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::TypeParameter, "p.A")]
        );
    }

    #[test]
    fn renamed_parameter() {
        assert_eq!(
            parameter_leaves(ONE_PARAMETER, "<E:Ljava/lang/Object;>Ljava/lang/Object;"),
            vec![leaf(
                ElementType::TypeParameter,
                DeltaKind::Changed,
                DeltaFlag::TypeParameterName,
                "T"
            )]
        );
    }

    #[test]
    fn class_bounds() {
        let number = "<T:Ljava/lang/Number;>Ljava/lang/Object;";
        let integer = "<T:Ljava/lang/Integer;>Ljava/lang/Object;";

        assert_eq!(
            parameter_leaves(ONE_PARAMETER, number),
            vec![leaf(ElementType::TypeParameter, DeltaKind::Added, DeltaFlag::ClassBound, "T")]
        );
        assert_eq!(
            parameter_leaves(number, ONE_PARAMETER),
            vec![leaf(ElementType::TypeParameter, DeltaKind::Removed, DeltaFlag::ClassBound, "T")]
        );
        assert_eq!(
            parameter_leaves(number, integer),
            vec![leaf(ElementType::TypeParameter, DeltaKind::Changed, DeltaFlag::ClassBound, "T")]
        );
    }

    #[test]
    fn interface_bounds() {
        let runnable = "<T::Ljava/lang/Runnable;>Ljava/lang/Object;";
        let both = "<T::Ljava/lang/Runnable;:Ljava/io/Serializable;>Ljava/lang/Object;";

        assert_eq!(
            parameter_leaves(ONE_PARAMETER, runnable),
            vec![leaf(
                ElementType::TypeParameter,
                DeltaKind::Added,
                DeltaFlag::InterfaceBounds,
                "T"
            )]
        );
        assert_eq!(
            parameter_leaves(runnable, ONE_PARAMETER),
            vec![leaf(
                ElementType::TypeParameter,
                DeltaKind::Removed,
                DeltaFlag::InterfaceBounds,
                "T"
            )]
        );
        assert_eq!(
            parameter_leaves(runnable, both),
            vec![leaf(
                ElementType::TypeParameter,
                DeltaKind::Changed,
                DeltaFlag::InterfaceBounds,
                "T"
            )]
        );
    }

    #[test]
    fn reordered_interface_bounds_are_changed() {
        let before = "<T::Ljava/lang/Runnable;:Ljava/io/Serializable;>Ljava/lang/Object;";
        let after = "<T::Ljava/io/Serializable;:Ljava/lang/Runnable;>Ljava/lang/Object;";

        let changed = leaf(
            ElementType::TypeParameter,
            DeltaKind::Changed,
            DeltaFlag::InterfaceBound,
            "T",
        );
        assert_eq!(parameter_leaves(before, after), vec![changed.clone(), changed]);
    }
}

// ============================================================================
// Fields
// ============================================================================

mod fields {
    use super::*;

    fn single_field(access: u32, value: Option<i64>) -> FieldDescriptor {
        let field = FieldDescriptor::new("X", access, "I");
        match value {
            Some(v) => field.with_value(ConstantValue::Integer(v)),
            None => field,
        }
    }

    fn field_change(old: FieldDescriptor, new: FieldDescriptor) -> Vec<Leaf> {
        tuples(&compare(&class("p.A").with_field(old), &class("p.A").with_field(new)).outcome)
    }

    #[test]
    fn field_moved_up_to_superclass() {
        let old_base = class("p.B");
        let new_base = class("p.B").with_field(FieldDescriptor::new("f", PUBLIC, "I"));
        let old = class("p.A")
            .with_super("p.B")
            .with_field(FieldDescriptor::new("f", PUBLIC, "I"));
        let new = class("p.A").with_super("p.B");

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_type(&old_base),
            Fixture::new().with_type(&new_base),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::FieldMovedUp, "f")]
        );
        assert!(comparison.is_compatible());
    }

    #[test]
    fn enum_constant_removed() {
        let access = PUBLIC | AccessFlags::ENUM | AccessFlags::FINAL;
        let old = TypeDescriptor::new("p.Color", access).with_field(FieldDescriptor::new(
            "RED",
            CONSTANT | AccessFlags::ENUM,
            "Lp/Color;",
        ));
        let new = TypeDescriptor::new("p.Color", access);

        assert_eq!(
            tuples(&compare(&old, &new).outcome),
            vec![leaf(ElementType::Enum, DeltaKind::Removed, DeltaFlag::EnumConstant, "RED")]
        );
    }

    #[test]
    fn protected_field_removed_from_extend_restricted_class() {
        let old = class("p.A").with_field(FieldDescriptor::new("f", PROTECTED, "I"));
        let new = class("p.A");

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_restrictions(&old, Restrictions::NO_EXTEND),
            Fixture::new().with_restrictions(&new, Restrictions::NO_EXTEND),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Class,
                DeltaKind::RemovedExtendRestriction,
                DeltaFlag::Field,
                "f"
            )]
        );
        assert!(comparison.is_compatible());
    }

    #[test]
    fn final_to_non_final_instance_field() {
        assert_eq!(
            field_change(
                single_field(PUBLIC | AccessFlags::FINAL, None),
                single_field(PUBLIC, None)
            ),
            vec![leaf(
                ElementType::Field,
                DeltaKind::Changed,
                DeltaFlag::FinalToNonFinalNonStatic,
                "X"
            )]
        );
    }

    #[test]
    fn final_to_non_final_static_constant() {
        assert_eq!(
            field_change(
                single_field(CONSTANT, Some(1)),
                single_field(PUBLIC | AccessFlags::STATIC, None)
            ),
            vec![
                leaf(ElementType::Field, DeltaKind::Removed, DeltaFlag::Value, "X"),
                leaf(
                    ElementType::Field,
                    DeltaKind::Changed,
                    DeltaFlag::FinalToNonFinalStaticConstant,
                    "X"
                ),
            ]
        );
    }

    #[test]
    fn final_to_non_final_static_non_constant() {
        assert_eq!(
            field_change(
                single_field(CONSTANT, None),
                single_field(PUBLIC | AccessFlags::STATIC, None)
            ),
            vec![leaf(
                ElementType::Field,
                DeltaKind::Changed,
                DeltaFlag::FinalToNonFinalStaticNonConstant,
                "X"
            )]
        );
    }

    #[test]
    fn interface_constant_value_change_is_breaking() {
        let old = TypeDescriptor::new("p.I", INTERFACE).with_field(single_field(CONSTANT, Some(1)));
        let new = TypeDescriptor::new("p.I", INTERFACE).with_field(single_field(CONSTANT, Some(2)));

        let comparison = compare(&old, &new);
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Field, DeltaKind::Changed, DeltaFlag::Value, "X")]
        );
        assert!(!comparison.is_compatible());
    }

    #[test]
    fn field_becoming_a_constant_adds_a_value() {
        let old = class("p.A").with_field(single_field(PUBLIC | AccessFlags::STATIC, None));
        let new = class("p.A").with_field(single_field(CONSTANT, Some(1)));

        let comparison = compare(&old, &new);
        assert_eq!(
            tuples(&comparison.outcome),
            vec![
                leaf(ElementType::Field, DeltaKind::Added, DeltaFlag::Value, "X"),
                leaf(ElementType::Field, DeltaKind::Changed, DeltaFlag::NonFinalToFinal, "X"),
            ]
        );
        assert!(comparison.outcome.leaves().iter().all(|d| !d.is_compatible()));
    }

    #[test]
    fn protected_value_change_in_extend_restricted_class_is_non_visible() {
        let access = PROTECTED | AccessFlags::STATIC | AccessFlags::FINAL;
        let old = class("p.A").with_field(
            FieldDescriptor::new("f", access, "I").with_value(ConstantValue::Integer(1)),
        );
        let new = class("p.A").with_field(
            FieldDescriptor::new("f", access, "I").with_value(ConstantValue::Integer(2)),
        );

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_restrictions(&old, Restrictions::NO_EXTEND),
            Fixture::new().with_restrictions(&new, Restrictions::NO_EXTEND),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Field,
                DeltaKind::ChangedNonVisible,
                DeltaFlag::Value,
                "f"
            )]
        );
        assert!(comparison.is_compatible());
    }
}

// ============================================================================
// Methods
// ============================================================================

mod methods {
    use super::*;

    fn method(access: u32) -> MethodDescriptor {
        MethodDescriptor::new("m", access, "()V")
    }

    #[test]
    fn added_exceptions_stop_after_first_checked() {
        let old = class("p.A").with_method(method(PUBLIC));
        let new = class("p.A")
            .with_method(method(PUBLIC).with_exceptions(["x.Unknown", "x.AlsoUnknown"]));

        let comparison = compare(&old, &new);
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Method,
                DeltaKind::Added,
                DeltaFlag::CheckedException,
                "m()V"
            )]
        );
        assert!(!comparison.status.is_ok());
    }

    #[test]
    fn unresolvable_removed_exception_is_checked() {
        let old = class("p.A")
            .with_method(method(PUBLIC).with_exceptions(["x.Unknown", "x.AlsoUnknown"]));
        let new = class("p.A").with_method(method(PUBLIC));

        let comparison = compare(&old, &new);
        // Reporting stops after the first checked removal.
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(
                ElementType::Method,
                DeltaKind::Removed,
                DeltaFlag::CheckedException,
                "m()V"
            )]
        );
        assert!(!comparison.status.is_ok());
    }

    #[test]
    fn method_moved_up_to_superclass() {
        let old_base = class("p.B");
        let new_base = class("p.B").with_method(method(PUBLIC));
        let old = class("p.A").with_super("p.B").with_method(method(PUBLIC));
        let new = class("p.A").with_super("p.B");

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_type(&old_base),
            Fixture::new().with_type(&new_base),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::MethodMovedUp, "m()V")]
        );
    }

    #[test]
    fn removed_constructor_uses_constructor_flag() {
        let old = class("p.A").with_method(MethodDescriptor::new("<init>", PUBLIC, "()V"));
        let new = class("p.A");

        assert_eq!(
            tuples(&compare(&old, &new).outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::Constructor, "A()V")]
        );
    }

    #[test]
    fn narrowing_to_private_is_not_downgraded() {
        let old = class("p.A").with_method(method(PUBLIC));
        let new = class("p.A").with_method(method(AccessFlags::PRIVATE));

        let comparison = compare(&old, &new);
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Method, DeltaKind::Changed, DeltaFlag::DecreaseAccess, "m()V")]
        );
        assert!(!comparison.is_compatible());
    }

    #[test]
    fn changes_to_a_private_method_are_non_visible() {
        let old = class("p.A").with_method(method(AccessFlags::PRIVATE));
        let new = class("p.A").with_method(method(AccessFlags::PRIVATE | AccessFlags::FINAL));

        let comparison = compare(&old, &new);
        let kinds: Vec<DeltaKind> = comparison.outcome.leaves().iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DeltaKind::ChangedNonVisible]);
        assert!(comparison.is_compatible());
    }

    #[test]
    fn varargs_transitions() {
        let varargs = class("p.A").with_method(MethodDescriptor::new(
            "m",
            PUBLIC | AccessFlags::VARARGS,
            "([I)V",
        ));
        let array = class("p.A").with_method(MethodDescriptor::new("m", PUBLIC, "([I)V"));

        assert_eq!(
            tuples(&compare(&varargs, &array).outcome),
            vec![leaf(ElementType::Method, DeltaKind::Changed, DeltaFlag::VarargsToArray, "m([I)V")]
        );
        assert_eq!(
            tuples(&compare(&array, &varargs).outcome),
            vec![leaf(ElementType::Method, DeltaKind::Changed, DeltaFlag::ArrayToVarargs, "m([I)V")]
        );
    }

    #[test]
    fn method_made_final() {
        let old = class("p.A").with_method(method(PUBLIC));
        let new = class("p.A").with_method(method(PUBLIC | AccessFlags::FINAL));

        let open = compare(&old, &new);
        assert_eq!(
            tuples(&open.outcome),
            vec![leaf(
                ElementType::Method,
                DeltaKind::ChangedNotExtendRestriction,
                DeltaFlag::NonFinalToFinal,
                "m()V"
            )]
        );
        assert!(!open.is_compatible());

        let restricted = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_restrictions(&old, Restrictions::NO_EXTEND),
            Fixture::new().with_restrictions(&new, Restrictions::NO_EXTEND),
        );
        assert_eq!(
            tuples(&restricted.outcome),
            vec![leaf(
                ElementType::Method,
                DeltaKind::ChangedExtendRestriction,
                DeltaFlag::NonFinalToFinal,
                "m()V"
            )]
        );
        assert!(restricted.is_compatible());
    }

    #[test]
    fn removed_annotation_default_is_never_downgraded() {
        let annotation = PUBLIC | AccessFlags::INTERFACE | AccessFlags::ABSTRACT | AccessFlags::ANNOTATION;
        let element = |access: u32, default: bool| {
            let method = MethodDescriptor::new("value", access, "()I");
            let method = if default {
                method.with_default_value(serde_json::json!(1))
            } else {
                method
            };
            TypeDescriptor::new("p.Ann", annotation).with_method(method)
        };

        for access in [PUBLIC | AccessFlags::ABSTRACT, AccessFlags::ABSTRACT] {
            let comparison = compare(&element(access, true), &element(access, false));
            assert_eq!(
                tuples(&comparison.outcome),
                vec![leaf(
                    ElementType::Method,
                    DeltaKind::Removed,
                    DeltaFlag::AnnotationDefaultValue,
                    "value()I"
                )],
                "access {access:#x}"
            );
        }
    }

    #[test]
    fn static_initializer_added_and_removed() {
        let plain = class("p.A");
        let initialized = class("p.A").with_method(MethodDescriptor::new(
            "<clinit>",
            AccessFlags::STATIC,
            "()V",
        ));

        let added = compare(&plain, &initialized);
        assert_eq!(
            tuples(&added.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Added, DeltaFlag::Clinit, "<clinit>()V")]
        );
        assert!(added.is_compatible());

        assert_eq!(
            tuples(&compare(&initialized, &plain).outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::Clinit, "<clinit>()V")]
        );
    }

    #[test]
    fn added_method_overriding_an_inherited_one() {
        let base = class("p.B").with_method(method(PUBLIC));
        let old = class("p.A").with_super("p.B");
        let new = class("p.A").with_super("p.B").with_method(method(PUBLIC));

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_type(&base),
            Fixture::new().with_type(&base),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Added, DeltaFlag::OverridenMethod, "m()V")]
        );
    }

    #[test]
    fn added_method_moved_down_from_superclass() {
        let old_base = class("p.B").with_method(method(PUBLIC));
        let new_base = class("p.B");
        let old = class("p.A").with_super("p.B");
        let new = class("p.A").with_super("p.B").with_method(method(PUBLIC));

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_type(&old_base),
            Fixture::new().with_type(&new_base),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Added, DeltaFlag::MethodMovedDown, "m()V")]
        );
    }
}

// ============================================================================
// Reference Restrictions
// ============================================================================

mod reference_restrictions {
    use super::*;

    fn no_reference() -> ApiAnnotations {
        ApiAnnotations::new(Visibility::Api, Restrictions::NO_REFERENCE)
    }

    #[test]
    fn field_becoming_reference_restricted_is_removed_from_api() {
        let field = FieldDescriptor::new("f", PUBLIC, "I");
        let t = class("p.A").with_field(field.clone());

        let comparison = compare_fixtures(
            &t,
            &t,
            Fixture::new(),
            Fixture::new().with_annotations(&field.handle("p.A"), no_reference()),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::ApiField, "f")]
        );
    }

    #[test]
    fn method_becoming_reference_restricted_is_removed_from_api() {
        let method = MethodDescriptor::new("m", PUBLIC, "()V");
        let t = class("p.A").with_method(method.clone());

        let comparison = compare_fixtures(
            &t,
            &t,
            Fixture::new(),
            Fixture::new().with_annotations(&method.handle("p.A"), no_reference()),
        );
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::ApiMethod, "m()V")]
        );
    }

    #[test]
    fn removing_a_reference_restricted_field_is_silent() {
        let field = FieldDescriptor::new("f", PUBLIC, "I");
        let old = class("p.A").with_field(field.clone());
        let new = class("p.A");

        let comparison = compare_fixtures(
            &old,
            &new,
            Fixture::new().with_annotations(&field.handle("p.A"), no_reference()),
            Fixture::new(),
        );
        assert!(comparison.outcome.is_no_delta());
    }
}

// ============================================================================
// Member Types
// ============================================================================

mod member_types {
    use super::*;

    const NESTED: u32 = PUBLIC | AccessFlags::STATIC;

    #[test]
    fn member_type_removed() {
        let old = class("p.A").with_member_type(MemberTypeDescriptor::new("p.A$Inner", NESTED));
        let new = class("p.A");

        let comparison = compare(&old, &new);
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::TypeMember, "p.A$Inner")]
        );
        assert!(!comparison.is_compatible());
    }

    #[test]
    fn static_member_type_added() {
        let old = class("p.A");
        let new = class("p.A").with_member_type(MemberTypeDescriptor::new("p.A$Inner", NESTED));

        assert_eq!(
            tuples(&compare(&old, &new).outcome),
            vec![leaf(
                ElementType::Class,
                DeltaKind::AddedNotExtendRestrictionStatic,
                DeltaFlag::TypeMember,
                "p.A$Inner"
            )]
        );
    }

    #[test]
    fn nested_changes_are_spliced_into_the_owner() {
        let outer = class("p.A").with_member_type(MemberTypeDescriptor::new("p.A$Inner", NESTED));
        let old_inner = TypeDescriptor::new("p.A$Inner", NESTED)
            .with_nesting(Some("p.A"), Some("Inner"))
            .with_method(MethodDescriptor::new("m", PUBLIC, "()V"));
        let new_inner =
            TypeDescriptor::new("p.A$Inner", NESTED).with_nesting(Some("p.A"), Some("Inner"));

        let comparison = compare_fixtures(
            &outer,
            &outer,
            Fixture::new().with_type(&old_inner),
            Fixture::new().with_type(&new_inner),
        );

        let leaves = comparison.outcome.leaves();
        assert_eq!(
            tuples(&comparison.outcome),
            vec![leaf(ElementType::Class, DeltaKind::Removed, DeltaFlag::Method, "m()V")]
        );
        assert_eq!(leaves[0].type_name, "p.A$Inner");
    }
}
