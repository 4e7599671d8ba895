//! Property-based tests for the signature decoder and the comparator.
//!
//! The decoder must never panic on arbitrary input, and comparing any type
//! against an identical copy of itself must produce no delta.

use apidiff::compare::ComparisonScope;
use apidiff::model::{
    AccessFlags, ApiBaseline, ApiComponent, FieldDescriptor, MethodDescriptor, TypeDescriptor,
    VisibilityMask,
};
use apidiff::{decode_signature, ApiComparator};
use proptest::prelude::*;

fn access_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        Just(AccessFlags::PUBLIC),
        Just(AccessFlags::PROTECTED),
        Just(AccessFlags::PRIVATE),
        Just(0),
        Just(AccessFlags::PUBLIC | AccessFlags::STATIC),
        Just(AccessFlags::PUBLIC | AccessFlags::FINAL),
    ]
}

fn descriptor_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("I"),
        Just("J"),
        Just("Ljava/lang/String;"),
        Just("[Ljava/lang/Object;"),
    ]
}

/// A type with uniquely named fields and methods.
fn type_strategy() -> impl Strategy<Value = TypeDescriptor> {
    (
        prop::collection::vec((access_strategy(), descriptor_strategy()), 0..6),
        prop::collection::vec((access_strategy(), descriptor_strategy()), 0..6),
        any::<bool>(),
    )
        .prop_map(|(fields, methods, generic)| {
            let mut descriptor = TypeDescriptor::new("p.Generated", AccessFlags::PUBLIC)
                .with_super("java.lang.Object");
            if generic {
                descriptor = descriptor.with_signature("<T:Ljava/lang/Number;>Ljava/lang/Object;");
            }
            for (i, (access, ty)) in fields.into_iter().enumerate() {
                descriptor = descriptor.with_field(FieldDescriptor::new(format!("f{i}"), access, ty));
            }
            for (i, (access, ty)) in methods.into_iter().enumerate() {
                descriptor = descriptor.with_method(MethodDescriptor::new(
                    format!("m{i}"),
                    access,
                    format!("({ty})V"),
                ));
            }
            descriptor
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn decode_signature_doesnt_panic(s in "\\PC{0,200}") {
        let _ = decode_signature(&s);
    }

    #[test]
    fn decode_signature_doesnt_panic_on_signature_alphabet(s in "[<>;:LTI+*\\-\\[^()./a-zA-Z]{0,120}") {
        let decoded = decode_signature(&s);
        prop_assert_eq!(decoded.clone(), decode_signature(&s));
    }

    #[test]
    fn type_parameter_names_are_preserved(names in prop::collection::hash_set("[A-Z][a-z]{0,3}", 1..5)) {
        let names: Vec<String> = names.into_iter().collect();
        let params: String = names.iter().map(|n| format!("{n}:Ljava/lang/Object;")).collect();
        let decoded = decode_signature(&format!("<{params}>Ljava/lang/Object;"));

        let decoded_names: Vec<&str> = decoded.type_parameters.iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(decoded_names, expected);
        prop_assert!(decoded.type_parameters.iter().all(|p| p.class_bound.is_none()));
    }

    #[test]
    fn identical_types_have_no_delta(descriptor in type_strategy()) {
        let mut component = ApiComponent::new("core");
        component.add_type(&descriptor).unwrap();
        let baseline = ApiBaseline::new("generated").with_component(component);
        let scope = ComparisonScope::new(&baseline, "core");

        for mask in [VisibilityMask::API, VisibilityMask::API_SPI, VisibilityMask::ALL] {
            let outcome = ApiComparator::new().compare(&descriptor, &descriptor.clone(), scope, scope, mask);
            prop_assert!(outcome.is_no_delta(), "mask {:?} produced {:?}", mask, outcome);
        }
    }
}
