//! Superclass and superinterface set comparison.

use super::engine::{Frame, TypeComparison};
use super::status::Side;
use crate::delta::{DeltaFlag, DeltaKind};
use crate::model::TypeDescriptor;
use indexmap::IndexSet;

/// How the new set relates to the old one.
fn set_change(
    old: &IndexSet<TypeDescriptor>,
    new: &IndexSet<TypeDescriptor>,
    contracted: DeltaFlag,
    expanded: DeltaFlag,
) -> Option<DeltaFlag> {
    if old.iter().any(|t| !new.contains(t)) {
        Some(contracted)
    } else if new.len() > old.len() {
        Some(expanded)
    } else {
        None
    }
}

impl TypeComparison<'_> {
    pub(super) fn compare_hierarchy(&mut self, frame: &mut Frame<'_>) {
        self.compare_superclasses(frame);
        self.compare_superinterfaces(frame);
    }

    fn compare_superclasses(&mut self, frame: &mut Frame<'_>) {
        let old_walk = self.ancestors(Side::Old, frame.old);
        let new_walk = self.ancestors(Side::New, frame.new);
        if !old_walk.complete || !new_walk.complete {
            tracing::debug!(type_name = %frame.new.name, "superclass set incomplete, skipping");
            return;
        }
        let change = match (old_walk.set(), new_walk.set()) {
            (None, None) => None,
            (None, Some(_)) => Some((DeltaKind::Added, DeltaFlag::Superclass)),
            (Some(_), None) => Some((DeltaKind::Changed, DeltaFlag::Superclass)),
            (Some(old), Some(new)) => set_change(
                old,
                new,
                DeltaFlag::ContractedSuperclassSet,
                DeltaFlag::ExpandedSuperclassSet,
            )
            .map(|flag| (DeltaKind::Changed, flag)),
        };
        if let Some((kind, flag)) = change {
            self.report_hierarchy(frame, kind, flag);
        }
    }

    fn compare_superinterfaces(&mut self, frame: &mut Frame<'_>) {
        let old_walk = self.interfaces(Side::Old, frame.old);
        let new_walk = self.interfaces(Side::New, frame.new);
        if !old_walk.complete || !new_walk.complete {
            tracing::debug!(type_name = %frame.new.name, "interface set incomplete, skipping");
            return;
        }
        let flag = match (old_walk.set(), new_walk.set()) {
            (None, None) => None,
            (None, Some(_)) => Some(DeltaFlag::ExpandedSuperinterfacesSet),
            (Some(_), None) => Some(DeltaFlag::ContractedSuperinterfacesSet),
            (Some(old), Some(new)) => set_change(
                old,
                new,
                DeltaFlag::ContractedSuperinterfacesSet,
                DeltaFlag::ExpandedSuperinterfacesSet,
            ),
        };
        if let Some(flag) = flag {
            self.report_hierarchy(frame, DeltaKind::Changed, flag);
        }
    }

    fn report_hierarchy(&self, frame: &mut Frame<'_>, kind: DeltaKind, flag: DeltaFlag) {
        let affected = frame.type_affected();
        let key = frame.new.name.clone();
        let arguments = vec![frame.display_name()];
        frame.add(frame.element_type, kind, flag, affected, key, arguments);
    }
}
