//! Structural model of compiled types.
//!
//! These are the read-only views the comparison engine walks: a
//! [`TypeDescriptor`] per compiled type, its fields, methods and nested-type
//! stubs, access flags, and the owner annotations (visibility and
//! restrictions) resolved for an element.
//!
//! Baselines group types into components:
//!
//! ```ignore
//! let mut component = ApiComponent::new("org.example.core");
//! component.add_type(&TypeDescriptor::new("org.example.Widget", AccessFlags::PUBLIC))?;
//! let baseline = ApiBaseline::new("1.0").with_component(component);
//! ```

mod access;
mod baseline;
mod descriptor;
mod handle;
pub mod names;
mod signature;

pub use access::*;
pub use baseline::*;
pub use descriptor::*;
pub use handle::*;
pub use signature::*;
