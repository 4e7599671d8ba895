//! Method, constructor and static initializer comparison.

use super::engine::{access_transition, Affected, Frame, TypeComparison};
use super::fields::addition_kind;
use super::generics::Subject;
use super::status::Side;
use crate::delta::{DeltaFlag, DeltaKind, ElementType};
use crate::model::{MethodDescriptor, TypeDescriptor};
use std::collections::HashSet;

fn method_arguments(frame: &Frame<'_>, method: &MethodDescriptor) -> Vec<String> {
    vec![frame.display_name(), method.display_name(&frame.new.name)]
}

/// Whether `holder` declares a method with this name and descriptor that
/// `accept` lets through.
fn declares(
    holder: &TypeDescriptor,
    method: &MethodDescriptor,
    accept: impl Fn(&MethodDescriptor) -> bool,
) -> bool {
    holder
        .method(&method.name, &method.descriptor)
        .is_some_and(accept)
}

fn is_inheritable(method: &MethodDescriptor) -> bool {
    method.access.is_visible()
}

impl TypeComparison<'_> {
    pub(super) fn compare_methods(&mut self, frame: &mut Frame<'_>) {
        let (old, new) = (frame.old, frame.new);
        let mut matched: HashSet<(&str, &str)> = HashSet::new();

        for method in old.all_methods().filter(|m| !m.access.is_synthetic()) {
            let counterpart = new
                .method(&method.name, &method.descriptor)
                .filter(|m| !m.access.is_synthetic());
            match counterpart {
                Some(new_method) => {
                    matched.insert((method.name.as_str(), method.descriptor.as_str()));
                    if !method.is_clinit() {
                        self.method_changed(frame, method, new_method);
                    }
                }
                None if method.is_clinit() => {
                    self.report_clinit(frame, DeltaKind::Removed, method);
                }
                None => self.method_removed(frame, method),
            }
        }

        for method in new.all_methods() {
            if method.access.is_synthetic()
                || matched.contains(&(method.name.as_str(), method.descriptor.as_str()))
            {
                continue;
            }
            if method.is_clinit() {
                self.report_clinit(frame, DeltaKind::Added, method);
            } else {
                self.method_added(frame, method);
            }
        }
    }

    fn report_clinit(&self, frame: &mut Frame<'_>, kind: DeltaKind, method: &MethodDescriptor) {
        let arguments = vec![frame.display_name()];
        let key = method.key(&frame.new.name);
        frame.add(
            frame.element_type,
            kind,
            DeltaFlag::Clinit,
            Affected::single(method.access),
            key,
            arguments,
        );
    }

    fn is_method_reference_restricted(
        &mut self,
        side: Side,
        owner: &str,
        method: &MethodDescriptor,
    ) -> bool {
        self.mask.is_api_only()
            && self
                .annotations(side, &method.handle(owner))
                .restrictions
                .is_reference_restricted()
    }

    fn method_removed(&mut self, frame: &mut Frame<'_>, method: &MethodDescriptor) {
        let owner = frame.element_type;
        let affected = Affected::single(method.access).constructor(method.is_constructor());
        let key = method.key(&frame.new.name);
        let arguments = method_arguments(frame, method);

        if !method.access.is_visible() {
            frame.add(owner, DeltaKind::Removed, DeltaFlag::Method, affected, key, arguments);
            return;
        }
        if !method.is_constructor() && self.method_moved_up(frame, method) {
            frame.add(
                owner,
                DeltaKind::Removed,
                DeltaFlag::MethodMovedUp,
                affected,
                key,
                arguments,
            );
            return;
        }
        if self.is_method_reference_restricted(Side::Old, &frame.old.name, method) {
            return;
        }
        let (kind, flag) = if frame.old.is_annotation() {
            let flag = if method.default_value.is_some() {
                DeltaFlag::MethodWithDefaultValue
            } else {
                DeltaFlag::MethodWithoutDefaultValue
            };
            (DeltaKind::Removed, flag)
        } else if method.access.is_protected() && frame.new_restrictions.is_extend_restricted() {
            (DeltaKind::RemovedExtendRestriction, DeltaFlag::Method)
        } else {
            (DeltaKind::Removed, DeltaFlag::Method)
        };
        frame.add(owner, kind, flag, affected, key, arguments);
    }

    /// Whether the new type still inherits the method. Classes look through
    /// their ancestors and `java.lang.Object`; interfaces through their
    /// superinterfaces, where only public methods count.
    fn method_moved_up(&mut self, frame: &Frame<'_>, method: &MethodDescriptor) -> bool {
        if frame.new.is_interface() {
            let walk = self.interfaces(Side::New, frame.new);
            return walk
                .types
                .iter()
                .any(|t| declares(t, method, |m| m.access.is_public()));
        }
        let walk = self.ancestors(Side::New, frame.new);
        if walk.types.iter().any(|t| declares(t, method, is_inheritable)) {
            return true;
        }
        self.object_type(Side::New)
            .is_some_and(|object| declares(&object.descriptor, method, is_inheritable))
    }

    fn method_changed(
        &mut self,
        frame: &mut Frame<'_>,
        old: &MethodDescriptor,
        new: &MethodDescriptor,
    ) {
        if self.mask.is_api_only() {
            let was_restricted = self.is_method_reference_restricted(Side::Old, &frame.old.name, old);
            let is_restricted = self.is_method_reference_restricted(Side::New, &frame.new.name, new);
            match (was_restricted, is_restricted) {
                (false, true) => {
                    self.report_reference_restricted(frame, old);
                    return;
                }
                (true, false) => {
                    self.method_added(frame, new);
                    return;
                }
                (true, true) => return,
                (false, false) => {}
            }
        }

        let element_type = if new.is_constructor() {
            ElementType::Constructor
        } else {
            ElementType::Method
        };
        let affected = Affected::member(old.access, new.access).constructor(new.is_constructor());
        let subject = Subject {
            element_type,
            key: new.key(&frame.new.name),
            arguments: method_arguments(frame, new),
            affected,
        };
        let report = |frame: &mut Frame<'_>, kind: DeltaKind, flag: DeltaFlag| {
            frame.add(
                element_type,
                kind,
                flag,
                affected,
                subject.key.clone(),
                subject.arguments.clone(),
            );
        };

        self.compare_exceptions(frame, old, new, &subject);

        match (old.is_varargs(), new.is_varargs()) {
            (true, false) => report(frame, DeltaKind::Changed, DeltaFlag::VarargsToArray),
            (false, true) => report(frame, DeltaKind::Changed, DeltaFlag::ArrayToVarargs),
            _ => {}
        }

        if let Some(flag) = access_transition(old.access, new.access) {
            report(frame, DeltaKind::Changed, flag);
        }

        match (old.access.is_abstract(), new.access.is_abstract()) {
            (true, false) => report(frame, DeltaKind::Changed, DeltaFlag::AbstractToNonAbstract),
            (false, true) => report(frame, DeltaKind::Changed, DeltaFlag::NonAbstractToAbstract),
            _ => {}
        }

        match (old.access.is_final(), new.access.is_final()) {
            (true, false) if new.access.is_visible() => {
                report(frame, DeltaKind::Changed, DeltaFlag::FinalToNonFinal);
            }
            (false, true) => {
                let kind = if frame.new_restrictions.is_extend_restricted() {
                    DeltaKind::ChangedExtendRestriction
                } else {
                    DeltaKind::ChangedNotExtendRestriction
                };
                report(frame, kind, DeltaFlag::NonFinalToFinal);
            }
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
                old.access.is_native(),
                new.access.is_native(),
                DeltaFlag::NativeToNonNative,
                DeltaFlag::NonNativeToNative,
            ),
            (
                old.access.is_synchronized(),
                new.access.is_synchronized(),
                DeltaFlag::SynchronizedToNonSynchronized,
                DeltaFlag::NonSynchronizedToSynchronized,
            ),
        ];
        for (was, is, lost, gained) in transitions {
            match (was, is) {
                (true, false) => report(frame, DeltaKind::Changed, lost),
                (false, true) => report(frame, DeltaKind::Changed, gained),
                _ => {}
            }
        }

        self.compare_signatures(frame, old.signature.as_deref(), new.signature.as_deref(), &subject);

        match (&old.default_value, &new.default_value) {
            (None, Some(_)) => report(frame, DeltaKind::Added, DeltaFlag::AnnotationDefaultValue),
            (Some(_), None) => frame.add(
                element_type,
                DeltaKind::Removed,
                DeltaFlag::AnnotationDefaultValue,
                affected.pinned(),
                subject.key.clone(),
                subject.arguments.clone(),
            ),
            (Some(a), Some(b)) if a != b => {
                report(frame, DeltaKind::Changed, DeltaFlag::AnnotationDefaultValue);
            }
            _ => {}
        }
    }

    /// Removed and added exceptions are each reported until the first checked
    /// one; unchecked ones before it are all reported.
    fn compare_exceptions(
        &mut self,
        frame: &mut Frame<'_>,
        old: &MethodDescriptor,
        new: &MethodDescriptor,
        subject: &Subject,
    ) {
        let (old_exceptions, new_exceptions) = (old.exceptions(), new.exceptions());

        for exception in old_exceptions.iter().filter(|e| !new_exceptions.contains(e)) {
            let checked = self.is_checked_exception(Side::Old, exception);
            let flag = if checked {
                DeltaFlag::CheckedException
            } else {
                DeltaFlag::UncheckedException
            };
            report_exception(frame, subject, DeltaKind::Removed, flag, exception);
            if checked {
                break;
            }
        }

        for exception in new_exceptions.iter().filter(|e| !old_exceptions.contains(e)) {
            let checked = self.is_checked_exception(Side::New, exception);
            let flag = if checked {
                DeltaFlag::CheckedException
            } else {
                DeltaFlag::UncheckedException
            };
            report_exception(frame, subject, DeltaKind::Added, flag, exception);
            if checked {
                break;
            }
        }
    }

    fn report_reference_restricted(&self, frame: &mut Frame<'_>, method: &MethodDescriptor) {
        let flag = if method.is_constructor() {
            DeltaFlag::ApiConstructor
        } else if frame.old.is_annotation() {
            if method.default_value.is_some() {
                DeltaFlag::ApiMethodWithDefaultValue
            } else {
                DeltaFlag::ApiMethodWithoutDefaultValue
            }
        } else {
            DeltaFlag::ApiMethod
        };
        let key = method.key(&frame.new.name);
        let arguments = method_arguments(frame, method);
        frame.add(
            frame.element_type,
            DeltaKind::Removed,
            flag,
            Affected::single(method.access).pinned(),
            key,
            arguments,
        );
    }

    fn method_added(&mut self, frame: &mut Frame<'_>, method: &MethodDescriptor) {
        if self.is_method_reference_restricted(Side::New, &frame.new.name, method) {
            return;
        }
        let (kind, flag) = if method.is_constructor() {
            (DeltaKind::Added, DeltaFlag::Constructor)
        } else if frame.new.is_annotation() {
            let flag = if method.default_value.is_some() {
                DeltaFlag::MethodWithDefaultValue
            } else {
                DeltaFlag::MethodWithoutDefaultValue
            };
            (DeltaKind::Added, flag)
        } else if self.overrides_inherited(frame, method) {
            (DeltaKind::Added, DeltaFlag::OverridenMethod)
        } else if self.inherited_before(frame, method) {
            (DeltaKind::Added, DeltaFlag::MethodMovedDown)
        } else {
            (addition_kind(frame, method.access.is_static()), DeltaFlag::Method)
        };
        let affected = Affected::single(method.access).constructor(method.is_constructor());
        let key = method.key(&frame.new.name);
        let arguments = method_arguments(frame, method);
        frame.add(frame.element_type, kind, flag, affected, key, arguments);
    }

    /// Declared by a new ancestor or superinterface.
    fn overrides_inherited(&mut self, frame: &Frame<'_>, method: &MethodDescriptor) -> bool {
        let ancestors = self.ancestors(Side::New, frame.new);
        if ancestors.types.iter().any(|t| declares(t, method, is_inheritable)) {
            return true;
        }
        let interfaces = self.interfaces(Side::New, frame.new);
        interfaces.types.iter().any(|t| declares(t, method, is_inheritable))
    }

    /// Declared by an ancestor of the old type.
    fn inherited_before(&mut self, frame: &Frame<'_>, method: &MethodDescriptor) -> bool {
        let ancestors = self.ancestors(Side::Old, frame.old);
        ancestors.types.iter().any(|t| declares(t, method, is_inheritable))
    }
}

fn report_exception(
    frame: &mut Frame<'_>,
    subject: &Subject,
    kind: DeltaKind,
    flag: DeltaFlag,
    exception: &str,
) {
    let mut arguments = subject.arguments.clone();
    arguments.push(exception.to_string());
    frame.add(
        subject.element_type,
        kind,
        flag,
        subject.affected,
        subject.key.clone(),
        arguments,
    );
}
