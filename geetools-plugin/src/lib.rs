//! geetools extension system
//!
//! Provides the trait every helper method implements, the bundle that groups
//! methods under one name, and the registry that attaches bundles to proxy
//! kinds and dispatches calls by name.

mod registry;
mod traits;

pub mod args;

pub use registry::{BoundBundle, Bundle, ExtensionRegistry};
pub use traits::{ArgMeta, ExtensionMethod, MethodMeta};

/// Re-export core types for method authors
pub mod prelude {
    pub use crate::args::*;
    pub use crate::{ArgMeta, Bundle, ExtensionMethod, ExtensionRegistry, MethodMeta};
    pub use geetools_core::prelude::*;
}
