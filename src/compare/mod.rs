//! Binary compatibility comparison of API types.
//!
//! The comparator takes an old and a new [`TypeDescriptor`](crate::model::TypeDescriptor)
//! together with the [`ResolutionContext`] each one lives in, and produces a
//! [`DeltaOutcome`](crate::delta::DeltaOutcome). The comparison runs these
//! steps in order:
//!
//! 1. Visibility gate on the owner annotations
//! 2. Restriction and access changes of the type itself
//! 3. Category check (class, interface, enum, annotation)
//! 4. Superclass and superinterface sets
//! 5. Fields, then methods and constructors
//! 6. Type modifiers and generic signature
//! 7. Nested member types, compared recursively
//!
//! Resolution problems never abort a comparison; they are logged, recorded
//! on the [`ComparisonStatus`] and answered conservatively.
//!
//! # Example
//!
//! ```ignore
//! use apidiff::compare::{ApiComparator, ComparisonScope};
//! use apidiff::model::VisibilityMask;
//!
//! let comparator = ApiComparator::new();
//! let outcome = comparator.compare(
//!     &old_type,
//!     &new_type,
//!     ComparisonScope::new(&old_baseline, "org.example.core"),
//!     ComparisonScope::new(&new_baseline, "org.example.core"),
//!     VisibilityMask::API,
//! );
//! ```

mod comparator;
mod component;
mod engine;
mod fields;
mod generics;
mod hierarchy;
mod members;
mod methods;
mod resolver;
mod status;

pub use comparator::{ApiComparator, Comparison};
pub use status::{ComparisonStatus, ResolutionIssue, Side};

use crate::resolve::ResolutionContext;

/// The context a type is resolved in and the component it belongs to.
#[derive(Clone, Copy)]
pub struct ComparisonScope<'a> {
    pub context: &'a dyn ResolutionContext,
    pub component: &'a str,
}

impl<'a> ComparisonScope<'a> {
    #[must_use]
    pub fn new(context: &'a dyn ResolutionContext, component: &'a str) -> Self {
        Self { context, component }
    }
}

impl std::fmt::Debug for ComparisonScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonScope")
            .field("context", &self.context.name())
            .field("component", &self.component)
            .finish()
    }
}
