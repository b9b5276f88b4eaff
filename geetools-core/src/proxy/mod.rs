//! Proxy handles
//!
//! Each handle wraps one expression node and knows which kind of
//! server-side object it stands for. Handles are immutable: every method
//! builds a new invocation node around the receiver and returns a new
//! handle. Casting between kinds reuses the node unchanged, the same way
//! the service's clients cast computed objects.

macro_rules! proxy_type {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name($crate::Value);

        impl $crate::proxy::Proxy for $name {
            const KIND: Option<$crate::Kind> = $kind;

            fn from_value(value: $crate::Value) -> Self {
                Self(value)
            }

            fn value(&self) -> &$crate::Value {
                &self.0
            }

            fn into_value(self) -> $crate::Value {
                self.0
            }
        }

        impl From<$name> for $crate::Value {
            fn from(handle: $name) -> $crate::Value {
                handle.0
            }
        }

        impl From<&$name> for $crate::Value {
            fn from(handle: &$name) -> $crate::Value {
                handle.0.clone()
            }
        }
    };
}

pub(crate) use proxy_type;

mod collection;
mod feature;
mod geometry;
mod image;
mod list;
mod misc;
mod primitives;

pub use collection::FeatureCollection;
pub use feature::Feature;
pub use geometry::Geometry;
pub use image::{Image, ImageCollection, Projection};
pub use list::EeList;
pub use misc::{algorithms, Computed, Filter, Reducer};
pub use primitives::{Date, Dictionary, EeNumber, EeString};

use crate::{Kind, Value};

/// Typed handle over an expression node
pub trait Proxy: Clone + Sized {
    /// Registry kind, for handles that can carry an extension bundle
    const KIND: Option<Kind>;

    fn from_value(value: Value) -> Self;
    fn value(&self) -> &Value;
    fn into_value(self) -> Value;

    /// Reinterpret the node as another kind
    fn cast<T: Proxy>(self) -> T {
        T::from_value(self.into_value())
    }
}

/// Build a handle of kind `T` from an invocation
pub(crate) fn call<'a, T, I>(function: &str, args: I) -> T
where
    T: Proxy,
    I: IntoIterator<Item = (&'a str, Value)>,
{
    T::from_value(Value::invoke(function, args))
}
