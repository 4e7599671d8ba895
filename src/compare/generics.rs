//! Generic signature comparison shared by types, fields and methods.

use super::engine::{Affected, Frame, TypeComparison};
use crate::delta::{DeltaFlag, DeltaKind, ElementType};
use crate::model::{SignatureDescriptor, TypeParameterDescriptor};
use crate::parsers::decode_signature;

/// The element whose signature is compared.
pub(super) struct Subject {
    pub(super) element_type: ElementType,
    pub(super) key: String,
    pub(super) arguments: Vec<String>,
    pub(super) affected: Affected,
}

impl Subject {
    fn report(&self, frame: &mut Frame<'_>, kind: DeltaKind, flag: DeltaFlag) {
        frame.add(
            self.element_type,
            kind,
            flag,
            self.affected,
            self.key.clone(),
            self.arguments.clone(),
        );
    }

    fn report_parameter(
        &self,
        frame: &mut Frame<'_>,
        parameter: &str,
        kind: DeltaKind,
        flag: DeltaFlag,
    ) {
        let owner = self.arguments.last().cloned().unwrap_or_default();
        frame.add(
            ElementType::TypeParameter,
            kind,
            flag,
            self.affected,
            parameter,
            vec![owner, parameter.to_string()],
        );
    }
}

impl TypeComparison<'_> {
    pub(super) fn compare_signatures(
        &self,
        frame: &mut Frame<'_>,
        old: Option<&str>,
        new: Option<&str>,
        subject: &Subject,
    ) {
        match (old, new) {
            (None, None) => {}
            (None, Some(new)) => {
                let decoded = decode_signature(new);
                if decoded.has_type_parameters() {
                    subject.report(frame, DeltaKind::Added, DeltaFlag::TypeParameters);
                } else if decoded.has_type_arguments() {
                    subject.report(frame, DeltaKind::Added, DeltaFlag::TypeArguments);
                }
            }
            (Some(old), None) => {
                let decoded = decode_signature(old);
                if decoded.has_type_parameters() {
                    subject.report(frame, DeltaKind::Removed, DeltaFlag::TypeParameters);
                } else if decoded.has_type_arguments() {
                    subject.report(frame, DeltaKind::Removed, DeltaFlag::TypeArguments);
                }
            }
            (Some(old), Some(new)) => {
                if old != new {
                    compare_decoded(frame, &decode_signature(old), &decode_signature(new), subject);
                }
            }
        }
    }
}

fn compare_decoded(
    frame: &mut Frame<'_>,
    old: &SignatureDescriptor,
    new: &SignatureDescriptor,
    subject: &Subject,
) {
    let (old_count, new_count) = (old.type_parameters.len(), new.type_parameters.len());
    if old_count != new_count {
        let kind = if new_count > old_count {
            DeltaKind::Added
        } else {
            DeltaKind::Removed
        };
        subject.report(frame, kind, DeltaFlag::TypeParameter);
        return;
    }
    if old_count == 0 {
        if old.type_arguments != new.type_arguments {
            subject.report(frame, DeltaKind::Changed, DeltaFlag::Type);
        }
        return;
    }
    for (old_parameter, new_parameter) in old.type_parameters.iter().zip(&new.type_parameters) {
        compare_parameter(frame, old_parameter, new_parameter, subject);
    }
}

fn compare_parameter(
    frame: &mut Frame<'_>,
    old: &TypeParameterDescriptor,
    new: &TypeParameterDescriptor,
    subject: &Subject,
) {
    let name = old.name.as_str();
    if old.name != new.name {
        subject.report_parameter(frame, name, DeltaKind::Changed, DeltaFlag::TypeParameterName);
    }

    match (&old.class_bound, &new.class_bound) {
        (None, Some(_)) => {
            subject.report_parameter(frame, name, DeltaKind::Added, DeltaFlag::ClassBound);
        }
        (Some(_), None) => {
            subject.report_parameter(frame, name, DeltaKind::Removed, DeltaFlag::ClassBound);
        }
        (Some(a), Some(b)) if a != b => {
            subject.report_parameter(frame, name, DeltaKind::Changed, DeltaFlag::ClassBound);
        }
        _ => {}
    }

    let (old_bounds, new_bounds) = (&old.interface_bounds, &new.interface_bounds);
    match (old_bounds.is_empty(), new_bounds.is_empty()) {
        (true, true) => {}
        (true, false) => {
            subject.report_parameter(frame, name, DeltaKind::Added, DeltaFlag::InterfaceBounds);
        }
        (false, true) => {
            subject.report_parameter(frame, name, DeltaKind::Removed, DeltaFlag::InterfaceBounds);
        }
        (false, false) if old_bounds.len() != new_bounds.len() => {
            subject.report_parameter(frame, name, DeltaKind::Changed, DeltaFlag::InterfaceBounds);
        }
        (false, false) => {
            for (a, b) in old_bounds.iter().zip(new_bounds) {
                if a != b {
                    subject.report_parameter(
                        frame,
                        name,
                        DeltaKind::Changed,
                        DeltaFlag::InterfaceBound,
                    );
                }
            }
        }
    }
}
