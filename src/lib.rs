//! **Binary API compatibility checking for JVM libraries.**
//!
//! `apidiff` compares two versions of a compiled API and produces a tree of
//! classified differences ("deltas"). Every leaf delta is tagged with an element
//! type, a kind and a flag, so that a caller can tell whether an existing client
//! compiled against the old version would still link against the new one.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: Structural descriptors of compiled types ([`TypeDescriptor`]),
//!   access flags, API annotations, and in-memory baselines ([`ApiBaseline`]).
//! - **[`parsers`]**: The [`ClassFileParser`] seam and the generic signature decoder.
//! - **[`resolve`]**: The [`ResolutionContext`] trait used to look up supertypes,
//!   thrown types and member types during a comparison.
//! - **[`compare`]**: The [`ApiComparator`], which compares types, components and
//!   whole baselines.
//! - **[`delta`]**: The delta tree, its classification enums, visitors, and the
//!   binary compatibility table.
//! - **[`reports`]**: JSON and summary report generators.
//! - **[`pipeline`]**: Load → compare → report orchestration used by the CLI.
//!
//! ## Comparing Two Types
//!
//! ```no_run
//! use apidiff::{AccessFlags, ApiBaseline, ApiComparator, ApiComponent, TypeDescriptor};
//! use apidiff::compare::ComparisonScope;
//! use apidiff::model::VisibilityMask;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old_type = TypeDescriptor::new("org.example.Widget", AccessFlags::PUBLIC);
//!     let new_type = TypeDescriptor::new("org.example.Widget", AccessFlags::PUBLIC | AccessFlags::FINAL);
//!
//!     let mut component = ApiComponent::new("org.example");
//!     component.add_type(&old_type)?;
//!     let baseline = ApiBaseline::new("v1").with_component(component);
//!     let scope = ComparisonScope::new(&baseline, "org.example");
//!
//!     let outcome = ApiComparator::new().compare(&old_type, &new_type, scope, scope, VisibilityMask::API);
//!     for leaf in outcome.leaves() {
//!         println!("{} {} {}", leaf.element_type, leaf.kind, leaf.flag);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Comparing Two Baseline Snapshots
//!
//! ```no_run
//! use std::path::Path;
//! use apidiff::ApiComparator;
//! use apidiff::pipeline::load_baseline;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old = load_baseline(Path::new("release-1.yaml"), true)?;
//!     let new = load_baseline(Path::new("release-2.yaml"), true)?;
//!
//!     let comparison = ApiComparator::new().compare_baselines(&old, &new);
//!     println!("compatible: {}", comparison.is_compatible());
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `apidiff` binary wraps the pipeline: `apidiff compare old.yaml new.yaml`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod compare;
pub mod config;
pub mod delta;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod resolve;

// Re-export main types for convenience
pub use compare::{ApiComparator, Comparison, ComparisonScope, ComparisonStatus};
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, VisibilityFilter};
pub use config::{BehaviorConfig, ComparisonConfig, FilterConfig, OutputConfig};
pub use config::{CompareConfig, ConfigError, Validatable};
pub use delta::{Delta, DeltaFlag, DeltaKind, DeltaOutcome, DeltaTree, DeltaVisitor, ElementType};
pub use error::{ApiDiffError, ErrorContext, Result};
pub use model::{AccessFlags, ApiAnnotations, ApiBaseline, ApiComponent, TypeDescriptor};
pub use parsers::{decode_signature, ClassFileParser, SnapshotParser};
pub use reports::{ReportFormat, ReportGenerator};
pub use resolve::{ClassFile, ResolutionContext};
