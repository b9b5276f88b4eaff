//! Pixel values, scales and constant images

use crate::helpers::{as_strs, validate_positive, validate_unique_names};
use geetools_plugin::prelude::*;

/// Minimum nominal scale across the bands of `image`
pub fn min_scale(image: &Image) -> EeNumber {
    let scales = image
        .band_names()
        .map(|band| image.select(band).projection().nominal_scale());
    EeNumber::new(scales.sort().get(0))
}

/// First value of every band inside `geometry`, sampled at `scale` (the
/// image's minimum scale when omitted). Bands without pixels in the region
/// are left out of the dictionary.
pub fn get_values(image: &Image, geometry: &Geometry, scale: Option<f64>) -> Result<Dictionary, GeeError> {
    let scale: Value = match scale {
        Some(scale) => {
            validate_positive("getValues", "scale", scale)?;
            scale.into()
        }
        None => min_scale(image).into(),
    };
    let values = image.reduce_region(Reducer::first(), geometry, scale);
    let keys = values
        .keys()
        .map_drop_nulls(|key| algorithms::if_(algorithms::is_equal(values.get(key.clone()), Value::Null), Value::Null, key));
    Ok(values.select(keys))
}

/// Image with one constant band per value.
///
/// `values` defaults to `[0]` and `names` to `["constant"]`; when only
/// values are given the bands are named `constant`, `constant_1`, ...
pub fn full(values: Option<&[Number]>, names: Option<&[&str]>) -> Result<Image, GeeError> {
    let values: Vec<Number> = match values {
        Some([]) => return Err(GeeError::empty_input("full", "values")),
        Some(values) => values.to_vec(),
        None => vec![Number::Int(0)],
    };
    if let Some(bad) = values.iter().find(|v| !v.as_f64().is_finite()) {
        return Err(GeeError::invalid_argument("full", format!("values must be finite, got {}", bad)));
    }
    let names: Vec<String> = match names {
        Some([]) => return Err(GeeError::empty_input("full", "names")),
        Some(names) => {
            validate_unique_names("full", "names", names)?;
            names.iter().map(|n| n.to_string()).collect()
        }
        None => (0..values.len())
            .map(|i| if i == 0 { "constant".to_string() } else { format!("constant_{}", i) })
            .collect(),
    };
    if names.len() != values.len() {
        return Err(GeeError::length_mismatch("full", "values", "names", values.len(), names.len()));
    }

    let values = Value::List(values.into_iter().map(Value::from).collect());
    Ok(Image::constant(values).rename(names))
}

/// Add a `date` band holding the acquisition time in milliseconds
pub fn add_date(image: &Image) -> Image {
    let date = Image::constant(image.date().millis()).rename(vec!["date"]);
    image.add_bands(date)
}

// ============================================================================
// Extension methods
// ============================================================================

pub struct GetValues;
pub struct MinScale;
pub struct Full;
pub struct AddDate;

static GET_VALUES_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("geometry", "Geometry", "Region to sample"),
    ArgMeta::optional("scale", "Number", "Sampling scale in meters", "minScale()"),
];
static GET_VALUES_EXAMPLES: [&str; 2] = [
    "image.geetools.getValues(point)",
    "image.geetools.getValues(point, 30)",
];
static GET_VALUES_RELATED: [&str; 1] = ["minScale"];

static MIN_SCALE_ARGS: [ArgMeta; 0] = [];
static MIN_SCALE_EXAMPLES: [&str; 1] = ["image.geetools.minScale()"];
static MIN_SCALE_RELATED: [&str; 1] = ["getValues"];

static FULL_ARGS: [ArgMeta; 2] = [
    ArgMeta::optional("values", "List<Number>", "One value per band", "[0]"),
    ArgMeta::optional("names", "List<Text>", "One name per band", "[\"constant\"]"),
];
static FULL_EXAMPLES: [&str; 2] = [
    "Image.geetools.full()",
    "Image.geetools.full([1, 2, 3], [\"a\", \"b\", \"c\"])",
];
static FULL_RELATED: [&str; 1] = ["addDate"];

static ADD_DATE_ARGS: [ArgMeta; 0] = [];
static ADD_DATE_EXAMPLES: [&str; 1] = ["image.geetools.addDate()"];
static ADD_DATE_RELATED: [&str; 1] = ["full"];

impl ExtensionMethod for GetValues {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "getValues",
            kind: Kind::Image,
            description: "First value of every band inside a geometry",
            usage: "getValues(geometry, scale?)",
            args: &GET_VALUES_ARGS,
            returns: "Dictionary",
            examples: &GET_VALUES_EXAMPLES,
            is_static: false,
            related: &GET_VALUES_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("getValues", args, 2)?;
        let geometry = Geometry::new(require_value(args, 0, "getValues", "geometry")?.clone());
        let scale = optional_number(args, 1, "getValues", "scale")?.map(|n| n.as_f64());
        get_values(&Image::from_value(this.clone()), &geometry, scale).map(Proxy::into_value)
    }
}

impl ExtensionMethod for MinScale {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "minScale",
            kind: Kind::Image,
            description: "Minimum nominal scale across bands",
            usage: "minScale()",
            args: &MIN_SCALE_ARGS,
            returns: "Number",
            examples: &MIN_SCALE_EXAMPLES,
            is_static: false,
            related: &MIN_SCALE_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("minScale", args, 0)?;
        Ok(min_scale(&Image::from_value(this.clone())).into_value())
    }
}

impl ExtensionMethod for Full {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "full",
            kind: Kind::Image,
            description: "Constant image with one named band per value",
            usage: "full(values?, names?)",
            args: &FULL_ARGS,
            returns: "Image",
            examples: &FULL_EXAMPLES,
            is_static: true,
            related: &FULL_RELATED,
        }
    }

    fn call(&self, _this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("full", args, 2)?;
        let values = optional_number_list(args, 0, "full", "values")?;
        let names = optional_text_list(args, 1, "full", "names")?;
        let names = names.as_deref().map(as_strs);
        full(values.as_deref(), names.as_deref()).map(Proxy::into_value)
    }
}

impl ExtensionMethod for AddDate {
    fn meta(&self) -> MethodMeta {
        MethodMeta {
            name: "addDate",
            kind: Kind::Image,
            description: "Add a 'date' band with the acquisition time in milliseconds",
            usage: "addDate()",
            args: &ADD_DATE_ARGS,
            returns: "Image",
            examples: &ADD_DATE_EXAMPLES,
            is_static: false,
            related: &ADD_DATE_RELATED,
        }
    }

    fn call(&self, this: &Value, args: &[Value]) -> Result<Value, GeeError> {
        check_arity("addDate", args, 0)?;
        Ok(add_date(&Image::from_value(this.clone())).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use geetools_testkit::fixtures;
    use serde_json::json;

    #[test]
    fn test_min_scale() {
        let ev = fixtures::evaluator();
        assert_eq!(ev.get_info(&min_scale(&fixtures::s2_image())).unwrap(), json!(10));
        let b1 = fixtures::s2_image().select(vec!["B1"]);
        assert_eq!(ev.get_info(&min_scale(&b1)).unwrap(), json!(60));
    }

    #[test]
    fn test_get_values() {
        let ev = fixtures::evaluator();
        let values = get_values(&fixtures::s2_image(), &fixtures::vatican(), None).unwrap();
        assert_eq!(ev.get_info(&values).unwrap(), json!({"B1": 218, "B2": 244, "B3": 251}));
    }

    #[test]
    fn test_get_values_omits_bands_outside_region() {
        let ev = fixtures::evaluator();
        let values = get_values(&fixtures::partial_image(), &fixtures::vatican(), Some(30.0)).unwrap();
        assert_eq!(ev.get_info(&values).unwrap(), json!({"near": 1}));
    }

    #[test]
    fn test_get_values_rejects_bad_scale() {
        let err = get_values(&fixtures::s2_image(), &fixtures::vatican(), Some(0.0)).unwrap_err();
        assert_eq!(err.code, codes::INVALID_ARGUMENT);
    }

    #[test]
    fn test_full_then_get_values() {
        let ev = fixtures::evaluator();
        let image = full(Some(&[Number::Int(1), Number::Int(2), Number::Int(3)]), Some(&["a", "b", "c"])).unwrap();
        let values = get_values(&image, &fixtures::vatican(), None).unwrap();
        assert_eq!(ev.get_info(&values).unwrap(), json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn test_full_defaults() {
        let ev = fixtures::evaluator();
        let image = full(None, None).unwrap();
        assert_eq!(ev.get_info(&image.band_names()).unwrap(), json!(["constant"]));
        let image = full(Some(&[Number::Int(1), Number::Int(2)]), None).unwrap();
        assert_eq!(ev.get_info(&image.band_names()).unwrap(), json!(["constant", "constant_1"]));
    }

    #[test]
    fn test_full_length_mismatch() {
        let err = full(Some(&[Number::Int(1), Number::Int(2), Number::Int(3)]), Some(&["a", "b"])).unwrap_err();
        assert_eq!(err.code, codes::LENGTH_MISMATCH);
        let err = full(Some(&[]), None).unwrap_err();
        assert_eq!(err.code, codes::EMPTY_INPUT);
    }

    #[test]
    fn test_add_date() {
        let ev = fixtures::evaluator();
        let image = add_date(&fixtures::s2_image());
        assert_eq!(ev.get_info(&image.band_names()).unwrap(), json!(["B1", "B2", "B3", "date"]));
        let values = get_values(&image.select(vec!["date"]), &fixtures::vatican(), None).unwrap();
        assert_eq!(ev.get_info(&values).unwrap(), json!({"date": fixtures::S2_TIME_START}));
    }

    #[test]
    fn test_full_is_static() {
        assert!(Full.meta().is_static);
        let image = Full.call(&Value::Null, &[Value::from(vec![5.0])]).unwrap();
        assert_eq!(image.function_name(), Some("Image.rename"));
    }
}
