//! Nested member type comparison.

use super::engine::{Affected, Frame, TypeComparison};
use super::fields::addition_kind;
use super::status::Side;
use crate::delta::{DeltaFlag, DeltaKind};
use crate::model::{names, MemberTypeDescriptor};

impl TypeComparison<'_> {
    /// Matched member types are resolved and compared recursively; the rest
    /// are reported as added or removed members of the owner.
    pub(super) fn compare_member_types(&mut self, frame: &mut Frame<'_>) {
        let (old, new) = (frame.old, frame.new);

        for stub in &old.member_types {
            if self.skip_stub(frame, stub) {
                continue;
            }
            if new.member_type(&stub.name).is_some() {
                self.compare_member_pair(frame, &stub.name);
            } else {
                report_stub(frame, DeltaKind::Removed, stub);
            }
        }

        for stub in &new.member_types {
            if self.skip_stub(frame, stub) || old.member_type(&stub.name).is_some() {
                continue;
            }
            let kind = addition_kind(frame, stub.access.is_static());
            report_stub(frame, kind, stub);
        }
    }

    fn skip_stub(&self, frame: &Frame<'_>, stub: &MemberTypeDescriptor) -> bool {
        stub.name == frame.new.name || (self.mask.is_api_only() && !stub.access.is_visible())
    }

    fn compare_member_pair(&mut self, frame: &mut Frame<'_>, name: &str) {
        let old = self.find_type(Side::Old, name);
        let new = self.find_type(Side::New, name);
        let (Some(old), Some(new)) = (old, new) else {
            tracing::warn!(
                owner = %frame.new.name,
                member = name,
                "member type could not be resolved, skipping"
            );
            return;
        };
        let nested = self.compare_types(&old.descriptor, &new.descriptor);
        frame.deltas.extend(nested);
    }
}

fn report_stub(frame: &mut Frame<'_>, kind: DeltaKind, stub: &MemberTypeDescriptor) {
    let arguments = vec![frame.display_name(), names::simple_name(&stub.name).to_string()];
    frame.add(
        frame.element_type,
        kind,
        DeltaFlag::TypeMember,
        Affected::single(stub.access),
        stub.name.clone(),
        arguments,
    );
}
