//! geetools testkit
//!
//! An in-memory stand-in for the remote service: `LocalEvaluator`
//! interprets the expression graphs built by geetools over a small image
//! catalog, so helper behaviour can be asserted on concrete values.
//!
//! Images are made of constant-valued bands with a nominal scale and an
//! optional bounding-box footprint. Geometries are points, single-ring
//! polygons and collections, compared by bounding box. Algorithms outside
//! the subset geetools emits fail with [`EvalError::Unsupported`].

mod algorithms;
mod args;
mod data;
mod dates;
mod error;
mod eval;
mod geom;

pub mod fixtures;

pub use error::EvalError;
pub use eval::LocalEvaluator;
pub use fixtures::ImageFixture;
pub use geom::{BBox, METERS_PER_DEGREE};
