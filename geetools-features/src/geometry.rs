//! Geometry helpers

use geetools_plugin::prelude::*;

/// Geometry type names the service reports from `Geometry.type`
pub const GEOMETRY_TYPES: [&str; 8] = [
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "LinearRing",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

/// Only the inner geometries of type `geometry_type`, as a multi geometry
pub fn keep_type(geometry: &Geometry, geometry_type: &str) -> Result<Geometry, GeeError> {
    if !GEOMETRY_TYPES.contains(&geometry_type) {
        return Err(GeeError::invalid_argument(
            "keepType",
            format!("'{}' is not a geometry type", geometry_type),
        )
        .with_suggestion(format!("Use one of: {}", GEOMETRY_TYPES.join(", "))));
    }
    let kept = geometry.geometries().map_drop_nulls(|part| {
        let part = part.cast::<Geometry>();
        algorithms::if_(part.geometry_type().equals(geometry_type), part, Value::Null)
    });
    Ok(Geometry::multi(kept))
}

/// One feature per inner geometry, each carrying `properties`
pub fn to_feature_collection(geometry: &Geometry, properties: Option<&Dictionary>) -> FeatureCollection {
    let properties: Value = properties.map_or(Value::Null, Value::from);
    let features = geometry
        .geometries()
        .map(|part| Feature::new(part, properties.clone()));
    FeatureCollection::new(features)
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct KeepType;
pub struct ToFeatureCollection;

static KEEP_TYPE_ARGS: [ArgMeta; 1] = [ArgMeta::required("type", "Text", "Geometry type to keep, e.g. \"Polygon\"")];
static KEEP_TYPE_EXAMPLES: [&str; 1] = ["geometry.geetools.keepType(\"Polygon\")"];
static KEEP_TYPE_RELATED: [&str; 1] = ["toFeatureCollection"];

static TO_FC_ARGS: [ArgMeta; 1] = [ArgMeta::optional("properties", "Dictionary", "Properties of every feature", "none")];
static TO_FC_EXAMPLES: [&str; 2] = [
    "geometry.geetools.toFeatureCollection()",
    "geometry.geetools.toFeatureCollection({\"source\": \"survey\"})",
];
static TO_FC_RELATED: [&str; 1] = ["keepType"];

impl ExtensionMethod for KeepType {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "keepType",
            kind: Kind::Geometry,
            description: "Keep only the inner geometries of one type",
            usage: "keepType(type)",
            args: &KEEP_TYPE_ARGS,
            returns: "Geometry",
            examples: &KEEP_TYPE_EXAMPLES,
            is_static: false,
            related: &KEEP_TYPE_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("keepType", args, 1)?;
        let geometry_type = require_text(args, 0, "keepType", "type")?;
        keep_type(&Geometry::new(this.clone()), &geometry_type).map(Proxy::into_value)
    }
}

impl ExtensionMethod for ToFeatureCollection {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "toFeatureCollection",
            kind: Kind::Geometry,
            description: "One feature per inner geometry",
            usage: "toFeatureCollection(properties?)",
            args: &TO_FC_ARGS,
            returns: "FeatureCollection",
            examples: &TO_FC_EXAMPLES,
            is_static: false,
            related: &TO_FC_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("toFeatureCollection", args, 1)?;
        let properties = optional_value(args, 0).cloned().map(Dictionary::new);
        Ok(to_feature_collection(&Geometry::new(this.clone()), properties.as_ref()).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use geetools_testkit::fixtures;
    use serde_json::json;

    fn mixed() -> Geometry {
        Geometry::multi(Value::List(vec![
            Geometry::point(0.0, 0.0).into(),
            Geometry::rectangle(1.0, 1.0, 2.0, 2.0).into(),
            Geometry::point(5.0, 5.0).into(),
        ]))
    }

    #[test]
    fn test_keep_type_points() {
        let ev = fixtures::evaluator();
        let points = keep_type(&mixed(), "Point").unwrap();
        let types = points.geometries().map(|g| g.cast::<Geometry>().geometry_type());
        assert_eq!(ev.get_info(&types).unwrap(), json!(["Point", "Point"]));
    }

    #[test]
    fn test_keep_type_polygons() {
        let ev = fixtures::evaluator();
        let triangle = Geometry::polygon(vec![vec![[3.0, 3.0], [4.0, 3.0], [3.0, 4.0]]]);
        let geometry = Geometry::multi(mixed().geometries().add(triangle));
        let polygons = keep_type(&geometry, "Polygon").unwrap();
        assert_eq!(ev.get_info(&polygons.geometries().size()).unwrap(), json!(2));
    }

    #[test]
    fn test_keep_type_without_match_is_empty() {
        let ev = fixtures::evaluator();
        let none = keep_type(&mixed(), "LineString").unwrap();
        assert_eq!(ev.get_info(&none.geometries().size()).unwrap(), json!(0));
    }

    #[test]
    fn test_keep_type_rejects_unknown_type() {
        let err = keep_type(&mixed(), "Circle").unwrap_err();
        assert_eq!(err.code, codes::INVALID_ARGUMENT);
        assert!(err.suggestion.unwrap().contains("Polygon"));
    }

    #[test]
    fn test_to_feature_collection_with_properties() {
        let ev = fixtures::evaluator();
        let props = Dictionary::new(Value::from_json(&json!({"source": "survey"})));
        let fc = to_feature_collection(&mixed(), Some(&props));
        let info = ev.get_info(&fc).unwrap();
        let features = info["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[1]["geometry"]["type"], json!("Polygon"));
        assert_eq!(features[2]["properties"]["source"], json!("survey"));
    }

    #[test]
    fn test_to_feature_collection_without_properties() {
        let ev = fixtures::evaluator();
        let fc = to_feature_collection(&Geometry::point(1.0, 2.0), None);
        let info = ev.get_info(&fc).unwrap();
        assert_eq!(info["features"][0]["properties"], json!({}));
    }
}
