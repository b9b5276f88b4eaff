//! Catalog fixtures shared by the geetools test suites

use crate::data::{Band, Data, ImageData, Properties};
use crate::eval::LocalEvaluator;
use crate::geom::BBox;
use geetools_core::{Feature, FeatureCollection, Geometry, Image, Number, Value};

/// Sentinel-2 surface reflectance tile over Rome
pub const S2_ID: &str = "COPERNICUS/S2_SR_HARMONIZED/20200101T100319_20200101T100321_T32TQM";

/// Two bands, one covering the Vatican and one far away from it
pub const PARTIAL_ID: &str = "TESTS/PARTIAL_FOOTPRINT";

/// Acquisition time of [`S2_ID`], 2020-01-01T10:03:19Z
pub const S2_TIME_START: i64 = 1_577_872_999_000;

const S2_FOOTPRINT: BBox = [11.6, 41.4, 13.0, 42.4];

/// Builder for catalog images
#[derive(Debug, Clone, Default)]
pub struct ImageFixture {
    bands: Vec<Band>,
    properties: Properties,
}

impl ImageFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unbounded constant band
    pub fn band(mut self, name: &str, value: impl Into<Number>, scale: f64) -> Self {
        self.bands.push(Band {
            name: name.to_string(),
            value: value.into(),
            scale,
            footprint: None,
            masked: false,
        });
        self
    }

    /// Constant band with pixels only inside `footprint`
    pub fn band_within(self, name: &str, value: impl Into<Number>, scale: f64, footprint: BBox) -> Self {
        let mut fixture = self.band(name, value, scale);
        if let Some(band) = fixture.bands.last_mut() {
            band.footprint = Some(footprint);
        }
        fixture
    }

    /// Restrict every band added so far to `footprint`
    pub fn footprint(mut self, footprint: BBox) -> Self {
        for band in &mut self.bands {
            band.footprint = Some(footprint);
        }
        self
    }

    pub fn time_start(self, millis: i64) -> Self {
        self.property("system:time_start", millis)
    }

    /// Literal property; computed values are stored as null
    pub fn property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), literal(&value.into()));
        self
    }

    pub(crate) fn build(self) -> ImageData {
        ImageData {
            bands: self.bands,
            properties: self.properties,
        }
    }
}

fn literal(value: &Value) -> Data {
    match value {
        Value::Bool(b) => Data::Bool(*b),
        Value::Number(n) => Data::Number(*n),
        Value::Text(s) => Data::Text(s.clone()),
        Value::List(items) => Data::List(items.iter().map(literal).collect()),
        Value::Object(map) => Data::Dict(map.iter().map(|(k, v)| (k.clone(), literal(v))).collect()),
        _ => Data::Null,
    }
}

/// Evaluator with the Sentinel-2 tile and the partial-footprint image
pub fn evaluator() -> LocalEvaluator {
    LocalEvaluator::new()
        .with_image(
            S2_ID,
            ImageFixture::new()
                .band("B1", 218, 60.0)
                .band("B2", 244, 10.0)
                .band("B3", 251, 10.0)
                .band("B4", 189, 10.0)
                .band("B8", 2035, 10.0)
                .footprint(S2_FOOTPRINT)
                .time_start(S2_TIME_START)
                .property("SPACECRAFT_NAME", "Sentinel-2B"),
        )
        .with_image(
            PARTIAL_ID,
            ImageFixture::new()
                .band_within("near", 1, 30.0, [12.40, 41.85, 12.50, 41.95])
                .band_within("far", 2, 30.0, [0.0, 0.0, 1.0, 1.0])
                .time_start(0),
        )
}

/// Bands B1, B2 and B3 of the Sentinel-2 tile
pub fn s2_image() -> Image {
    Image::load(S2_ID).select(vec!["B1", "B2", "B3"])
}

pub fn partial_image() -> Image {
    Image::load(PARTIAL_ID)
}

/// A point inside the Vatican
pub fn vatican() -> Geometry {
    Geometry::point(12.4534, 41.9029)
}

fn properties(pairs: &[(&str, Value)]) -> Value {
    Value::Object(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
}

/// Two small squares around the Vatican, `name` north/south and `value` 1/2
pub fn vatican_features() -> FeatureCollection {
    FeatureCollection::new(Value::List(vec![
        Feature::new(
            Geometry::point(12.4534, 41.9029).buffer(50),
            properties(&[("name", "north".into()), ("value", 1.into())]),
        )
        .into(),
        Feature::new(
            Geometry::point(12.4540, 41.9010).buffer(50),
            properties(&[("name", "south".into()), ("value", 2.into())]),
        )
        .into(),
    ]))
}

/// One feature with a two-point geometry collection, one with a single point
pub fn mixed_features() -> FeatureCollection {
    let multi = Geometry::multi(Value::List(vec![
        Geometry::point(12.45, 41.90).into(),
        Geometry::point(12.46, 41.91).into(),
    ]));
    FeatureCollection::new(Value::List(vec![
        Feature::new(multi, properties(&[("kind", "multi".into())])).into(),
        Feature::new(Geometry::point(12.47, 41.92), properties(&[("kind", "single".into())])).into(),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geetools_core::Evaluate;
    use serde_json::json;

    #[test]
    fn test_s2_fixture_loads() {
        let ev = evaluator();
        assert_eq!(ev.get_info(&s2_image().band_names()).unwrap(), json!(["B1", "B2", "B3"]));
        assert_eq!(ev.get_info(&s2_image().date().millis()).unwrap(), json!(S2_TIME_START));
    }

    #[test]
    fn test_unknown_asset() {
        let err = evaluator().get_info(&Image::load("NOPE").band_names()).unwrap_err();
        assert_eq!(err, crate::EvalError::UnknownAsset("NOPE".into()));
    }
}
