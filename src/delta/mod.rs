//! The delta tree produced by a comparison.
//!
//! A [`DeltaTree`] is the payload-free root; its children are [`Delta`]
//! nodes. A delta without children is a leaf and represents one diagnosed
//! change. Component-level comparisons group the leaves of each compared
//! type under a single node for that type.
//!
//! # Example
//!
//! ```ignore
//! use apidiff::delta::{DeltaOutcome, DeltaKind};
//!
//! if let DeltaOutcome::Delta(tree) = outcome {
//!     for leaf in tree.leaves() {
//!         println!("{} {} {} {}", leaf.element_type, leaf.kind, leaf.flag, leaf.key);
//!     }
//!     println!("compatible: {}", tree.is_compatible());
//! }
//! ```

mod compatibility;
mod kinds;
mod visitor;

pub use compatibility::{is_compatible, Compatibility};
pub use kinds::{DeltaFlag, DeltaKind, ElementType, KindFamily};
pub use visitor::{DeltaVisitor, LeafCollector};

use crate::model::{AccessFlags, Restrictions};
use serde::{Deserialize, Serialize};

// ============================================================================
// Restriction state
// ============================================================================

/// Current and previous restrictions packed into one integer: the current
/// mask in the low 16 bits, the previous mask in the high 16 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestrictionState(u32);

impl RestrictionState {
    #[must_use]
    pub const fn new(current: Restrictions, previous: Restrictions) -> Self {
        Self(current.bits() as u32 | ((previous.bits() as u32) << 16))
    }

    #[must_use]
    pub const fn current(self) -> Restrictions {
        Restrictions((self.0 & 0xFFFF) as u16)
    }

    #[must_use]
    pub const fn previous(self) -> Restrictions {
        Restrictions((self.0 >> 16) as u16)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

// ============================================================================
// Delta
// ============================================================================

/// One node of the delta tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub element_type: ElementType,
    pub kind: DeltaKind,
    pub flag: DeltaFlag,
    pub restrictions: RestrictionState,
    pub old_modifiers: AccessFlags,
    pub new_modifiers: AccessFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    /// Qualified name of the type the change was found in
    pub type_name: String,
    /// Member key, e.g. `m(I)V`, a field name or the type name
    pub key: String,
    /// Ordered values for message-template substitution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Delta>,
}

impl Delta {
    #[must_use]
    pub fn new(
        element_type: ElementType,
        kind: DeltaKind,
        flag: DeltaFlag,
        type_name: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            element_type,
            kind,
            flag,
            restrictions: RestrictionState::default(),
            old_modifiers: AccessFlags::default(),
            new_modifiers: AccessFlags::default(),
            component_id: None,
            type_name: type_name.into(),
            key: key.into(),
            arguments: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_restrictions(mut self, restrictions: RestrictionState) -> Self {
        self.restrictions = restrictions;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, old: AccessFlags, new: AccessFlags) -> Self {
        self.old_modifiers = old;
        self.new_modifiers = new;
        self
    }

    #[must_use]
    pub fn with_component(mut self, component_id: Option<&str>) -> Self {
        self.component_id = component_id.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Delta>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaves below (or equal to) this node, in pre-order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Delta> {
        let mut collector = LeafCollector::default();
        self.accept(&mut collector);
        collector.into_leaves()
    }

    /// Pre-order traversal; children are skipped when `visit` returns false.
    pub fn accept<'a, V: DeltaVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        if visitor.visit(self) {
            for child in &self.children {
                child.accept(visitor);
            }
        }
        visitor.end_visit(self);
    }

    /// True when every leaf under this node is compatible.
    #[must_use]
    pub fn is_compatible(&self) -> bool {
        if self.is_leaf() {
            is_compatible(self)
        } else {
            self.children.iter().all(Self::is_compatible)
        }
    }
}

// ============================================================================
// Delta tree
// ============================================================================

/// Payload-free root of a delta tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaTree {
    pub children: Vec<Delta>,
}

impl DeltaTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, delta: Delta) {
        self.children.push(delta);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn accept<'a, V: DeltaVisitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        for child in &self.children {
            child.accept(visitor);
        }
    }

    #[must_use]
    pub fn leaves(&self) -> Vec<&Delta> {
        let mut collector = LeafCollector::default();
        self.accept(&mut collector);
        collector.into_leaves()
    }

    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.children.iter().all(Delta::is_compatible)
    }

    /// Leaves whose change breaks existing binaries.
    #[must_use]
    pub fn breaking(&self) -> Vec<&Delta> {
        self.leaves().into_iter().filter(|d| !is_compatible(d)).collect()
    }
}

impl From<Vec<Delta>> for DeltaTree {
    fn from(children: Vec<Delta>) -> Self {
        Self { children }
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of a comparison: the sentinel "compared, no difference" or a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "tree", rename_all = "snake_case")]
pub enum DeltaOutcome {
    NoDelta,
    Delta(DeltaTree),
}

impl DeltaOutcome {
    /// Wrap a tree, collapsing an empty one into `NoDelta`.
    #[must_use]
    pub fn from_tree(tree: DeltaTree) -> Self {
        if tree.is_empty() {
            Self::NoDelta
        } else {
            Self::Delta(tree)
        }
    }

    #[must_use]
    pub const fn is_no_delta(&self) -> bool {
        matches!(self, Self::NoDelta)
    }

    #[must_use]
    pub const fn tree(&self) -> Option<&DeltaTree> {
        match self {
            Self::NoDelta => None,
            Self::Delta(tree) => Some(tree),
        }
    }

    #[must_use]
    pub fn into_children(self) -> Vec<Delta> {
        match self {
            Self::NoDelta => Vec::new(),
            Self::Delta(tree) => tree.children,
        }
    }

    #[must_use]
    pub fn leaves(&self) -> Vec<&Delta> {
        self.tree().map(DeltaTree::leaves).unwrap_or_default()
    }

    #[must_use]
    pub fn is_compatible(&self) -> bool {
        self.tree().map_or(true, DeltaTree::is_compatible)
    }
}
