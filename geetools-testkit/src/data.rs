//! Concrete values produced by local evaluation

use crate::error::EvalError;
use crate::geom::{BBox, Geom};
use geetools_core::{FunctionDef, Number};
use serde_json::{json, Value as Json};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub type Properties = BTreeMap<String, Data>;

#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub name: String,
    pub value: Number,
    /// Nominal scale in meters
    pub scale: f64,
    /// `None` for unbounded bands
    pub footprint: Option<BBox>,
    /// Every pixel masked, e.g. after clipping outside the footprint
    pub masked: bool,
}

impl Band {
    /// Whether the band has pixels inside `region`
    pub fn covers(&self, region: &BBox) -> bool {
        !self.masked
            && self
                .footprint
                .map_or(true, |f| crate::geom::intersection(&f, region).is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageData {
    pub bands: Vec<Band>,
    pub properties: Properties,
}

impl ImageData {
    /// Footprint of all bands together; unbounded images cover the world
    pub fn footprint(&self) -> Geom {
        let boxes: Option<Vec<BBox>> = self.bands.iter().map(|b| b.footprint).collect();
        match boxes.and_then(|b| {
            b.into_iter()
                .reduce(|a, c| [a[0].min(c[0]), a[1].min(c[1]), a[2].max(c[2]), a[3].max(c[3])])
        }) {
            Some(bbox) => Geom::rectangle(bbox),
            None => Geom::world(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureData {
    pub geometry: Option<Geom>,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionData {
    pub elements: Vec<Data>,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterData {
    pub field: String,
    pub value: Box<Data>,
    pub negate: bool,
}

impl FilterData {
    pub fn accepts(&self, element: &Data) -> bool {
        let value = element
            .properties()
            .and_then(|p| p.get(&self.field))
            .unwrap_or(&Data::Null);
        same(value, &self.value) != self.negate
    }
}

/// Remote function together with the arguments visible where it was defined
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub def: FunctionDef,
    pub env: BTreeMap<String, Data>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Data {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<Data>),
    Dict(BTreeMap<String, Data>),
    Image(ImageData),
    Feature(FeatureData),
    Collection(CollectionData),
    Geometry(Geom),
    /// Milliseconds since epoch
    Date(i64),
    /// Nominal scale in meters
    Projection(f64),
    Reducer(String),
    Filter(FilterData),
    Closure(Closure),
}

impl Data {
    pub fn type_name(&self) -> &'static str {
        match self {
            Data::Null => "Null",
            Data::Bool(_) => "Boolean",
            Data::Number(_) => "Number",
            Data::Text(_) => "String",
            Data::List(_) => "List",
            Data::Dict(_) => "Dictionary",
            Data::Image(_) => "Image",
            Data::Feature(_) => "Feature",
            Data::Collection(_) => "Collection",
            Data::Geometry(_) => "Geometry",
            Data::Date(_) => "Date",
            Data::Projection(_) => "Projection",
            Data::Reducer(_) => "Reducer",
            Data::Filter(_) => "Filter",
            Data::Closure(_) => "Function",
        }
    }

    /// Truth value used by `Algorithms.If`
    pub fn is_truthy(&self) -> bool {
        match self {
            Data::Null => false,
            Data::Bool(b) => *b,
            Data::Number(n) => n.as_f64() != 0.0,
            Data::Text(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn properties(&self) -> Option<&Properties> {
        match self {
            Data::Image(image) => Some(&image.properties),
            Data::Feature(feature) => Some(&feature.properties),
            Data::Collection(collection) => Some(&collection.properties),
            _ => None,
        }
    }

    pub fn properties_mut(&mut self) -> Option<&mut Properties> {
        match self {
            Data::Image(image) => Some(&mut image.properties),
            Data::Feature(feature) => Some(&mut feature.properties),
            Data::Collection(collection) => Some(&mut collection.properties),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<Json, EvalError> {
        Ok(match self {
            Data::Null => Json::Null,
            Data::Bool(b) => Json::Bool(*b),
            Data::Number(Number::Int(i)) => Json::from(*i),
            Data::Number(Number::Float(f)) => number_json(*f),
            Data::Text(s) => Json::String(s.clone()),
            Data::List(items) => Json::Array(items.iter().map(Data::to_json).collect::<Result<_, _>>()?),
            Data::Dict(map) => Json::Object(properties_json(map)?),
            Data::Image(image) => json!({
                "type": "Image",
                "bands": image
                    .bands
                    .iter()
                    .map(|b| json!({"id": b.name, "scale": number_json(b.scale)}))
                    .collect::<Vec<_>>(),
                "properties": properties_json(&image.properties)?,
            }),
            Data::Feature(feature) => json!({
                "type": "Feature",
                "geometry": feature.geometry.as_ref().map(Geom::to_json),
                "properties": properties_json(&feature.properties)?,
            }),
            Data::Collection(collection) => {
                let images = !collection.elements.is_empty()
                    && collection.elements.iter().all(|e| matches!(e, Data::Image(_)));
                json!({
                    "type": if images { "ImageCollection" } else { "FeatureCollection" },
                    "features": collection.elements.iter().map(Data::to_json).collect::<Result<Vec<_>, _>>()?,
                    "properties": properties_json(&collection.properties)?,
                })
            }
            Data::Geometry(geom) => geom.to_json(),
            Data::Date(millis) => json!({"type": "Date", "value": millis}),
            Data::Projection(scale) => json!({"type": "Projection", "scale": number_json(*scale)}),
            Data::Reducer(_) | Data::Filter(_) | Data::Closure(_) => {
                return Err(EvalError::NotSerializable(self.type_name()))
            }
        })
    }
}

/// Integral floats are rendered as integers
fn number_json(f: f64) -> Json {
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        return Json::from(f as i64);
    }
    serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number)
}

fn properties_json(map: &BTreeMap<String, Data>) -> Result<serde_json::Map<String, Json>, EvalError> {
    map.iter().map(|(k, v)| Ok((k.clone(), v.to_json()?))).collect()
}

/// Equality used by list membership and `Algorithms.IsEqual`: numbers
/// compare by value whatever their representation
pub fn same(a: &Data, b: &Data) -> bool {
    match (a, b) {
        (Data::Number(x), Data::Number(y)) => x.as_f64() == y.as_f64(),
        (Data::List(x), Data::List(y)) => x.len() == y.len() && x.iter().zip(y).all(|(a, b)| same(a, b)),
        (Data::Dict(x), Data::Dict(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|((ka, va), (kb, vb))| ka == kb && same(va, vb))
        }
        _ => a == b,
    }
}

/// Ordering used by `List.sort`: numbers first, then strings
pub fn compare(a: &Data, b: &Data) -> Ordering {
    match (a, b) {
        (Data::Number(x), Data::Number(y)) => x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal),
        (Data::Text(x), Data::Text(y)) => x.cmp(y),
        (Data::Number(_), _) => Ordering::Less,
        (_, Data::Number(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_compares_numbers_by_value() {
        assert!(same(&Data::Number(Number::Int(1)), &Data::Number(Number::Float(1.0))));
        assert!(!same(&Data::Text("1".into()), &Data::Number(Number::Int(1))));
    }

    #[test]
    fn test_filter_on_missing_property() {
        let filter = FilterData {
            field: "kind".into(),
            value: Box::new(Data::Text("a".into())),
            negate: true,
        };
        let feature = Data::Feature(FeatureData {
            geometry: None,
            properties: Properties::new(),
        });
        assert!(filter.accepts(&feature));
    }

    #[test]
    fn test_reducers_are_not_serializable() {
        let data = Data::Reducer("first".into());
        assert_eq!(data.to_json(), Err(EvalError::NotSerializable("Reducer")));
    }
}
