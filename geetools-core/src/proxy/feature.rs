//! Features

use super::{call, proxy_type, Computed, Geometry};
use crate::{Kind, Value};

proxy_type!(Feature, Some(Kind::Feature));

impl Feature {
    /// Feature from a geometry (or null) and a property dictionary
    pub fn new(geometry: impl Into<Value>, properties: impl Into<Value>) -> Feature {
        call("Feature", [("geometry", geometry.into()), ("metadata", properties.into())])
    }

    pub fn geometry(&self) -> Geometry {
        call("Feature.geometry", [("feature", self.0.clone())])
    }

    pub fn get(&self, property: impl Into<Value>) -> Computed {
        call("Element.get", [("object", self.0.clone()), ("property", property.into())])
    }

    pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) -> Feature {
        call("Element.set", [("object", self.0.clone()), ("key", key.into()), ("value", value.into())])
    }

    /// Copy properties of `source`; all of them when `properties` is null
    pub fn copy_properties(&self, source: impl Into<Value>, properties: impl Into<Value>) -> Feature {
        call(
            "Element.copyProperties",
            [
                ("destination", self.0.clone()),
                ("source", source.into()),
                ("properties", properties.into()),
            ],
        )
    }
}
