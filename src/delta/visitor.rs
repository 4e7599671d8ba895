//! Pre-order traversal of delta trees.

use super::Delta;

/// Visitor invoked by [`Delta::accept`] and
/// [`DeltaTree::accept`](super::DeltaTree::accept).
pub trait DeltaVisitor<'a> {
    /// Called before a node's children. Return false to skip them.
    fn visit(&mut self, delta: &'a Delta) -> bool;

    /// Called after a node's children, whether or not they were visited.
    fn end_visit(&mut self, _delta: &'a Delta) {}
}

/// Collects the leaves of a tree in visiting order.
#[derive(Debug, Default)]
pub struct LeafCollector<'a> {
    leaves: Vec<&'a Delta>,
}

impl<'a> LeafCollector<'a> {
    #[must_use]
    pub fn into_leaves(self) -> Vec<&'a Delta> {
        self.leaves
    }
}

impl<'a> DeltaVisitor<'a> for LeafCollector<'a> {
    fn visit(&mut self, delta: &'a Delta) -> bool {
        if delta.is_leaf() {
            self.leaves.push(delta);
        }
        true
    }
}
