//! Geometries

use super::{call, proxy_type, EeList, EeString, FeatureCollection, Projection, Proxy};
use crate::{Kind, Value};

proxy_type!(Geometry, Some(Kind::Geometry));

impl Geometry {
    /// Wrap an existing node (computed geometry, or a cast)
    pub fn new(value: impl Into<Value>) -> Geometry {
        Geometry(value.into())
    }

    pub fn point(x: f64, y: f64) -> Geometry {
        call("GeometryConstructors.Point", [("coordinates", Value::from(vec![x, y]))])
    }

    pub fn rectangle(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Geometry {
        call(
            "GeometryConstructors.Rectangle",
            [("coordinates", Value::from(vec![xmin, ymin, xmax, ymax]))],
        )
    }

    /// Rings of `[x, y]` vertices; the first ring is the exterior
    pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Geometry {
        let coordinates = rings
            .into_iter()
            .map(|ring| Value::List(ring.into_iter().map(|[x, y]| Value::from(vec![x, y])).collect()))
            .collect::<Vec<_>>();
        call("GeometryConstructors.Polygon", [("coordinates", Value::List(coordinates))])
    }

    /// Heterogeneous collection of geometries
    pub fn multi(geometries: impl Into<Value>) -> Geometry {
        call("GeometryConstructors.MultiGeometry", [("geometries", geometries.into())])
    }

    /// GeoJSON type name, e.g. `"GeometryCollection"`
    pub fn geometry_type(&self) -> EeString {
        call("Geometry.type", [("geometry", self.0.clone())])
    }

    /// Inner geometries of a multi geometry
    pub fn geometries(&self) -> EeList {
        call("Geometry.geometries", [("geometry", self.0.clone())])
    }

    pub fn union(&self, other: &Geometry) -> Geometry {
        call("Geometry.union", [("left", self.0.clone()), ("right", other.0.clone())])
    }

    /// Merge overlapping parts
    pub fn dissolve(&self) -> Geometry {
        call("Geometry.dissolve", [("geometry", self.0.clone())])
    }

    /// Distance in meters
    pub fn buffer(&self, distance: impl Into<Value>) -> Geometry {
        call("Geometry.buffer", [("geometry", self.0.clone()), ("distance", distance.into())])
    }

    /// One feature per cell of `projection` intersecting this geometry
    pub fn covering_grid(&self, projection: Projection) -> FeatureCollection {
        call(
            "Geometry.coveringGrid",
            [("geometry", self.0.clone()), ("projection", projection.into_value())],
        )
    }
}
