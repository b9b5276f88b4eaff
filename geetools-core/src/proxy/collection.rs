//! Feature collections

use super::{call, proxy_type, Computed, EeList, EeNumber, Filter, Geometry, Proxy};
use crate::function;
use crate::{Kind, Value};

proxy_type!(FeatureCollection, Some(Kind::FeatureCollection));

impl FeatureCollection {
    /// Collection from a list of features (literal or computed)
    pub fn new(features: impl Into<Value>) -> FeatureCollection {
        call("Collection", [("features", features.into())])
    }

    pub fn size(&self) -> EeNumber {
        call("Collection.size", [("collection", self.0.clone())])
    }

    /// The first `count` elements, in iteration order
    pub fn to_list(&self, count: impl Into<Value>) -> EeList {
        call("Collection.toList", [("collection", self.0.clone()), ("count", count.into())])
    }

    pub fn first(&self) -> Computed {
        call("Collection.first", [("collection", self.0.clone())])
    }

    pub fn filter(&self, filter: Filter) -> FeatureCollection {
        call("Collection.filter", [("collection", self.0.clone()), ("filter", filter.into_value())])
    }

    pub fn merge(&self, other: &FeatureCollection) -> FeatureCollection {
        call("Collection.merge", [("collection1", self.0.clone()), ("collection2", other.0.clone())])
    }

    /// Apply `f` to every element. The result keeps the collection kind
    /// even when `f` returns images.
    pub fn map<F, R>(&self, f: F) -> FeatureCollection
    where
        F: Fn(Computed) -> R,
        R: Into<Value>,
    {
        let func = function::unary(|x| f(Computed::from_value(x)).into());
        call("Collection.map", [("collection", self.0.clone()), ("baseAlgorithm", func)])
    }

    /// Left fold over the elements: `f(element, accumulator)`
    pub fn iterate<F, R>(&self, f: F, first: impl Into<Value>) -> Computed
    where
        F: Fn(Computed, Computed) -> R,
        R: Into<Value>,
    {
        let func = function::binary(|x, acc| f(Computed::from_value(x), Computed::from_value(acc)).into());
        call(
            "Collection.iterate",
            [("collection", self.0.clone()), ("function", func), ("first", first.into())],
        )
    }

    /// Union of all geometries
    pub fn geometry(&self) -> Geometry {
        call("Collection.geometry", [("collection", self.0.clone())])
    }

    pub fn copy_properties(&self, source: impl Into<Value>) -> FeatureCollection {
        call(
            "Element.copyProperties",
            [("destination", self.0.clone()), ("source", source.into())],
        )
    }

    pub fn get(&self, property: impl Into<Value>) -> Computed {
        call("Element.get", [("object", self.0.clone()), ("property", property.into())])
    }

    pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) -> FeatureCollection {
        call("Element.set", [("object", self.0.clone()), ("key", key.into()), ("value", value.into())])
    }
}
