//! Class-file parsers and the generic signature decoder.
//!
//! The comparison engine never reads bytecode itself. A
//! [`ResolutionContext`](crate::resolve::ResolutionContext) hands out raw
//! class-file bytes and a [`ClassFileParser`] turns them into a
//! [`TypeDescriptor`](crate::model::TypeDescriptor). The bundled
//! [`SnapshotParser`] reads JSON descriptor snapshots.
//!
//! ## Usage
//!
//! ```ignore
//! use apidiff::parsers::{decode_signature, ClassFileParser, SnapshotParser};
//!
//! let descriptor = SnapshotParser::new().parse(&bytes)?;
//! let generics = decode_signature("<T:Ljava/lang/Number;>Ljava/lang/Object;");
//! assert_eq!(generics.type_parameters[0].name, "T");
//! ```

mod signature;
mod snapshot;
mod traits;

pub use signature::decode_signature;
pub use snapshot::SnapshotParser;
pub use traits::{is_class_file, ClassFileParser, FormatConfidence, CLASS_FILE_MAGIC};

use std::sync::Arc;

/// The parser used when none is configured.
#[must_use]
pub fn default_parser() -> Arc<dyn ClassFileParser> {
    Arc::new(SnapshotParser::new())
}
