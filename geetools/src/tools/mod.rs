//! Legacy flat functions
//!
//! Every function here is deprecated. Each one applies the configured
//! [`DeprecationPolicy`](crate::DeprecationPolicy), then forwards to the
//! accessor named in [`LEGACY_TABLE`] with its arguments in the same order.

mod deprecation;

pub mod date;
pub mod featurecollection;
pub mod image;

pub use deprecation::{lookup, LegacyEntry, LEGACY_TABLE, SINCE, TARGET};
