//! Field comparison.

use super::engine::{access_transition, Affected, Frame, TypeComparison};
use super::generics::Subject;
use super::status::Side;
use crate::delta::{DeltaFlag, DeltaKind, ElementType};
use crate::model::FieldDescriptor;
use std::collections::HashSet;

fn field_arguments(frame: &Frame<'_>, field: &FieldDescriptor) -> Vec<String> {
    vec![frame.display_name(), field.name.clone()]
}

impl TypeComparison<'_> {
    pub(super) fn compare_fields(&mut self, frame: &mut Frame<'_>) {
        let (old, new) = (frame.old, frame.new);
        let mut matched: HashSet<&str> = HashSet::new();

        for field in old.fields.values().filter(|f| !f.access.is_synthetic()) {
            match new.field(&field.name).filter(|f| !f.access.is_synthetic()) {
                Some(new_field) => {
                    matched.insert(field.name.as_str());
                    self.field_changed(frame, field, new_field);
                }
                None => self.field_removed(frame, field),
            }
        }

        for field in new.fields.values() {
            if field.access.is_synthetic() || matched.contains(field.name.as_str()) {
                continue;
            }
            self.field_added(frame, field);
        }
    }

    fn is_reference_restricted(&mut self, side: Side, owner: &str, field: &FieldDescriptor) -> bool {
        self.mask.is_api_only()
            && self
                .annotations(side, &field.handle(owner))
                .restrictions
                .is_reference_restricted()
    }

    fn field_removed(&mut self, frame: &mut Frame<'_>, field: &FieldDescriptor) {
        let affected = Affected::single(field.access);
        let arguments = field_arguments(frame, field);
        let owner = frame.element_type;

        if !field.access.is_visible() {
            frame.add(owner, DeltaKind::Removed, DeltaFlag::Field, affected, &field.name, arguments);
            return;
        }
        if self.field_moved_up(frame, field) {
            frame.add(
                owner,
                DeltaKind::Removed,
                DeltaFlag::FieldMovedUp,
                affected,
                &field.name,
                arguments,
            );
            return;
        }
        if self.is_reference_restricted(Side::Old, &frame.old.name, field) {
            return;
        }
        let (kind, flag) = if field.is_enum_constant() {
            (DeltaKind::Removed, DeltaFlag::EnumConstant)
        } else if field.access.is_protected() && frame.new_restrictions.is_extend_restricted() {
            (DeltaKind::RemovedExtendRestriction, DeltaFlag::Field)
        } else {
            (DeltaKind::Removed, DeltaFlag::Field)
        };
        frame.add(owner, kind, flag, affected, &field.name, arguments);
    }

    /// Whether the new type inherits a visible field of the same name.
    fn field_moved_up(&mut self, frame: &Frame<'_>, field: &FieldDescriptor) -> bool {
        let walk = if frame.new.is_interface() {
            self.interfaces(Side::New, frame.new)
        } else {
            self.ancestors(Side::New, frame.new)
        };
        walk.types.iter().any(|ancestor| {
            ancestor
                .field(&field.name)
                .is_some_and(|inherited| inherited.access.is_visible())
        })
    }

    fn field_changed(&mut self, frame: &mut Frame<'_>, old: &FieldDescriptor, new: &FieldDescriptor) {
        let owner = frame.old.name.as_str();
        if self.mask.is_api_only() {
            let was_restricted = self.is_reference_restricted(Side::Old, owner, old);
            let is_restricted = self.is_reference_restricted(Side::New, &frame.new.name, new);
            match (was_restricted, is_restricted) {
                (false, true) => {
                    let flag = if old.is_enum_constant() {
                        DeltaFlag::ApiEnumConstant
                    } else {
                        DeltaFlag::ApiField
                    };
                    let arguments = field_arguments(frame, old);
                    frame.add(
                        frame.element_type,
                        DeltaKind::Removed,
                        flag,
                        Affected::single(old.access),
                        &old.name,
                        arguments,
                    );
                    return;
                }
                (true, false) => {
                    self.field_added(frame, new);
                    return;
                }
                (true, true) => return,
                (false, false) => {}
            }
        }

        let affected = Affected::member(old.access, new.access);
        let subject = Subject {
            element_type: ElementType::Field,
            key: new.name.clone(),
            arguments: field_arguments(frame, new),
            affected,
        };
        let report = |frame: &mut Frame<'_>, kind: DeltaKind, flag: DeltaFlag| {
            frame.add(
                ElementType::Field,
                kind,
                flag,
                affected,
                subject.key.clone(),
                subject.arguments.clone(),
            );
        };

        if old.descriptor == new.descriptor {
            self.compare_signatures(frame, old.signature.as_deref(), new.signature.as_deref(), &subject);
        } else {
            report(frame, DeltaKind::Changed, DeltaFlag::Type);
        }

        let value_kind = match (&old.value, &new.value) {
            (None, Some(_)) => Some(DeltaKind::Added),
            (Some(_), None) => Some(DeltaKind::Removed),
            (Some(a), Some(b)) if a != b => Some(DeltaKind::Changed),
            _ => None,
        };
        if let Some(kind) = value_kind {
            let kind = if new.access.is_protected() && frame.new_restrictions.is_extend_restricted() {
                kind.to_non_visible()
            } else {
                kind
            };
            report(frame, kind, DeltaFlag::Value);
        }

        if let Some(flag) = access_transition(old.access, new.access) {
            report(frame, DeltaKind::Changed, flag);
        }

        match (old.access.is_final(), new.access.is_final()) {
            (true, false) => {
                let flag = if !old.access.is_static() {
                    DeltaFlag::FinalToNonFinalNonStatic
                } else if old.value.is_some() {
                    DeltaFlag::FinalToNonFinalStaticConstant
                } else {
                    DeltaFlag::FinalToNonFinalStaticNonConstant
                };
                report(frame, DeltaKind::Changed, flag);
            }
            (false, true) => report(frame, DeltaKind::Changed, DeltaFlag::NonFinalToFinal),
            _ => {}
        }

        let transitions = [
            (
                old.access.is_static(),
                new.access.is_static(),
                DeltaFlag::StaticToNonStatic,
                DeltaFlag::NonStaticToStatic,
            ),
            (
                old.access.is_transient(),
                new.access.is_transient(),
                DeltaFlag::TransientToNonTransient,
                DeltaFlag::NonTransientToTransient,
            ),
            (
                old.access.is_volatile(),
                new.access.is_volatile(),
                DeltaFlag::VolatileToNonVolatile,
                DeltaFlag::NonVolatileToVolatile,
            ),
        ];
        for (was, is, lost, gained) in transitions {
            match (was, is) {
                (true, false) => report(frame, DeltaKind::Changed, lost),
                (false, true) => report(frame, DeltaKind::Changed, gained),
                _ => {}
            }
        }
    }

    fn field_added(&mut self, frame: &mut Frame<'_>, field: &FieldDescriptor) {
        if self.is_reference_restricted(Side::New, &frame.new.name, field) {
            return;
        }
        let (kind, flag) = if field.is_enum_constant() {
            (DeltaKind::Added, DeltaFlag::EnumConstant)
        } else {
            (addition_kind(frame, field.access.is_static()), DeltaFlag::Field)
        };
        let arguments = field_arguments(frame, field);
        frame.add(
            frame.element_type,
            kind,
            flag,
            Affected::single(field.access),
            &field.name,
            arguments,
        );
    }
}

/// Kind for a member added to the compared type, qualified by the owner's
/// restrictions. The normalizer later turns it non-visible when needed.
pub(super) fn addition_kind(frame: &Frame<'_>, is_static: bool) -> DeltaKind {
    if frame.new.is_interface() {
        if frame.new_restrictions.is_implement_restricted() {
            DeltaKind::AddedImplementRestriction
        } else {
            DeltaKind::AddedNotImplementRestriction
        }
    } else if frame.new_restrictions.is_extend_restricted() {
        DeltaKind::AddedExtendRestriction
    } else if is_static {
        DeltaKind::AddedNotExtendRestrictionStatic
    } else {
        DeltaKind::AddedNotExtendRestriction
    }
}
