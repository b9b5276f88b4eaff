//! Grids and per-feature clipping

use crate::helpers::{validate_positive, validate_text};
use geetools_plugin::prelude::*;

/// Feature properties carried by the images of [`clip_on_collection`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeepProperties {
    /// Every property of the feature
    #[default]
    All,
    /// None of them
    Nothing,
    /// Only the listed properties
    Only(Vec<String>),
}

impl KeepProperties {
    /// Dynamic form: null or any non-zero flag keeps all, `0` keeps nothing,
    /// a list keeps those names
    pub fn from_value(func: &str, value: Option<&Value>) -> Result<Self, GeeError> {
        match value {
            None | Some(Value::Null) => Ok(KeepProperties::All),
            Some(Value::Number(n)) if n.as_f64() == 0.0 => Ok(KeepProperties::Nothing),
            Some(Value::Number(_)) => Ok(KeepProperties::All),
            Some(Value::Bool(false)) => Ok(KeepProperties::Nothing),
            Some(Value::Bool(true)) => Ok(KeepProperties::All),
            Some(Value::Text(name)) => Ok(KeepProperties::Only(vec![name.clone()])),
            Some(Value::List(items)) => items
                .iter()
                .map(|item| {
                    item.as_text()
                        .map(str::to_string)
                        .ok_or_else(|| GeeError::arg_type(func, "keepProperties", "List<Text>", item.type_name()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(KeepProperties::Only),
            Some(other) => Err(GeeError::arg_type(func, "keepProperties", "Number, null or List<Text>", other.type_name())),
        }
    }
}

/// Grid of cells `size` times the pixel size of `band` (first band when
/// omitted) covering `geometry` (the image footprint when omitted)
pub fn to_grid(image: &Image, size: Option<f64>, band: Option<&str>, geometry: Option<&Geometry>) -> Result<FeatureCollection, GeeError> {
    let size = size.unwrap_or(1.0);
    validate_positive("toGrid", "size", size)?;
    let band: Value = match band {
        Some(band) => {
            validate_text("toGrid", "band", band)?;
            band.into()
        }
        None => image.band_names().get(0).into(),
    };
    let geometry = geometry.cloned().unwrap_or_else(|| image.geometry());
    let projection = image.select(band).projection().scale(size, size);
    Ok(geometry.covering_grid(projection))
}

/// One image per feature of `collection`, clipped to the feature's geometry
pub fn clip_on_collection(image: &Image, collection: &FeatureCollection, keep: &KeepProperties) -> FeatureCollection {
    collection.map(|feature| {
        let feature = feature.cast::<Feature>();
        let clipped = image.clip(feature.geometry());
        match keep {
            KeepProperties::All => clipped.copy_properties(&feature, Value::Null),
            KeepProperties::Nothing => clipped,
            KeepProperties::Only(names) => clipped.copy_properties(&feature, names.as_slice()),
        }
    })
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct ToGrid;
pub struct ClipOnCollection;

static TO_GRID_ARGS: [ArgMeta; 3] = [
    ArgMeta::optional("size", "Number", "Cell size in pixels", "1"),
    ArgMeta::optional("band", "Text", "Band whose projection is used", "first band"),
    ArgMeta::optional("geometry", "Geometry", "Region to cover", "image footprint"),
];
static TO_GRID_EXAMPLES: [&str; 2] = ["image.geetools.toGrid()", "image.geetools.toGrid(10, \"B2\", region)"];
static TO_GRID_RELATED: [&str; 1] = ["clipOnCollection"];

static CLIP_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("collection", "FeatureCollection", "Features to clip on"),
    ArgMeta::optional("keepProperties", "Number | List<Text>", "Feature properties to copy; 0 copies none", "1"),
];
static CLIP_EXAMPLES: [&str; 2] = [
    "image.geetools.clipOnCollection(parcels)",
    "image.geetools.clipOnCollection(parcels, 0)",
];
static CLIP_RELATED: [&str; 1] = ["toGrid"];

impl ExtensionMethod for ToGrid {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "toGrid",
            kind: Kind::Image,
            description: "Grid of pixel-aligned cells covering a region",
            usage: "toGrid(size?, band?, geometry?)",
            args: &TO_GRID_ARGS,
            returns: "FeatureCollection",
            examples: &TO_GRID_EXAMPLES,
            is_static: false,
            related: &TO_GRID_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("toGrid", args, 3)?;
        let size = optional_number(args, 0, "toGrid", "size")?.map(|n| n.as_f64());
        let band = optional_text(args, 1, "toGrid", "band")?;
        let geometry = optional_value(args, 2).cloned().map(Geometry::new);
        to_grid(&Image::from_value(this.clone()), size, band.as_deref(), geometry.as_ref()).map(Proxy::into_value)
    }
}

impl ExtensionMethod for ClipOnCollection {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "clipOnCollection",
            kind: Kind::Image,
            description: "Clip the image on every feature of a collection",
            usage: "clipOnCollection(collection, keepProperties?)",
            args: &CLIP_ARGS,
            returns: "FeatureCollection",
            examples: &CLIP_EXAMPLES,
            is_static: false,
            related: &CLIP_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("clipOnCollection", args, 2)?;
        let collection = FeatureCollection::from_value(require_value(args, 0, "clipOnCollection", "collection")?.clone());
        let keep = KeepProperties::from_value("clipOnCollection", args.get(1))?;
        Ok(clip_on_collection(&Image::from_value(this.clone()), &collection, &keep).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use geetools_testkit::{fixtures, METERS_PER_DEGREE};
    use serde_json::json;

    #[test]
    fn test_to_grid_over_region() {
        let ev = fixtures::evaluator();
        // B2 pixels are 10 m, so 10 x 10 pixel cells are 100 m wide
        let region = Geometry::rectangle(0.0, 0.0, 250.0 / METERS_PER_DEGREE, 150.0 / METERS_PER_DEGREE);
        let grid = to_grid(&fixtures::s2_image(), Some(10.0), Some("B2"), Some(&region)).unwrap();
        assert_eq!(ev.get_info(&grid.size()).unwrap(), json!(6));
    }

    #[test]
    fn test_to_grid_rejects_non_positive_size() {
        let err = to_grid(&fixtures::s2_image(), Some(0.0), None, None).unwrap_err();
        assert_eq!(err.code, codes::INVALID_ARGUMENT);
    }

    #[test]
    fn test_clip_on_collection_keeps_all_properties() {
        let ev = fixtures::evaluator();
        let clipped = clip_on_collection(&fixtures::s2_image(), &fixtures::vatican_features(), &KeepProperties::All);
        let info = ev.get_info(&clipped).unwrap();
        let features = info["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["type"], json!("Image"));
        assert_eq!(features[0]["properties"]["name"], json!("north"));
        assert_eq!(features[1]["properties"]["value"], json!(2));
    }

    #[test]
    fn test_clip_on_collection_nothing() {
        let ev = fixtures::evaluator();
        let clipped = clip_on_collection(&fixtures::s2_image(), &fixtures::vatican_features(), &KeepProperties::Nothing);
        let info = ev.get_info(&clipped).unwrap();
        for feature in info["features"].as_array().unwrap() {
            assert!(feature["properties"].get("name").is_none());
            assert!(feature["properties"].get("value").is_none());
        }
    }

    #[test]
    fn test_clip_on_collection_only() {
        let ev = fixtures::evaluator();
        let keep = KeepProperties::Only(vec!["name".to_string()]);
        let clipped = clip_on_collection(&fixtures::s2_image(), &fixtures::vatican_features(), &keep);
        let info = ev.get_info(&clipped).unwrap();
        let props = &info["features"][0]["properties"];
        assert_eq!(props["name"], json!("north"));
        assert!(props.get("value").is_none());
    }

    #[test]
    fn test_keep_properties_from_value() {
        assert_eq!(KeepProperties::from_value("f", None).unwrap(), KeepProperties::All);
        assert_eq!(KeepProperties::from_value("f", Some(&Value::from(0))).unwrap(), KeepProperties::Nothing);
        assert_eq!(
            KeepProperties::from_value("f", Some(&Value::from(vec!["a"]))).unwrap(),
            KeepProperties::Only(vec!["a".to_string()])
        );
        assert_eq!(KeepProperties::from_value("f", Some(&Value::from(1))).unwrap(), KeepProperties::All);
        assert_eq!(KeepProperties::from_value("f", Some(&Value::from(3))).unwrap(), KeepProperties::All);
        assert!(KeepProperties::from_value("f", Some(&Value::from_json(&json!({"a": 1})))).is_err());
    }
}
