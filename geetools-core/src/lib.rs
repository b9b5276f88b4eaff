//! geetools core - fundamental types
//!
//! This crate provides the types every other geetools crate builds on:
//! - `Value`: one node of a remote expression graph
//! - proxy handles (`Image`, `FeatureCollection`, ...) wrapping those nodes
//! - `encode`: the service's REST expression format
//! - `GeeError`: structured errors for argument and configuration failures
//! - `Evaluate`: the seam through which callers get concrete values

mod error;
mod evaluate;
mod kind;
mod value;

pub mod encode;
pub mod function;
pub mod proxy;

pub use encode::{encode, Expression, ValueNode};
pub use error::{codes, ErrorContext, GeeError, Severity};
pub use evaluate::Evaluate;
pub use kind::{Kind, KindError};
pub use proxy::{
    algorithms, Computed, Date, Dictionary, EeList, EeNumber, EeString, Feature, FeatureCollection,
    Filter, Geometry, Image, ImageCollection, Projection, Proxy, Reducer,
};
pub use value::{FunctionDef, Invocation, Number, Value};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::proxy::*;
    pub use crate::{GeeError, Kind, Number, Severity, Value};
}
