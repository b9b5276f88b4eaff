//! `Collection.*`, `Element.*`, `Feature.*` and `Filter.*`

use super::num;
use crate::args::Args;
use crate::data::{CollectionData, Data, FeatureData, FilterData, Properties};
use crate::error::EvalError;
use crate::eval::LocalEvaluator;
use crate::geom::Geom;

/// Collection elements; bare geometries become features without properties
fn as_element(data: Data) -> Data {
    match data {
        Data::Geometry(geometry) => Data::Feature(FeatureData {
            geometry: Some(geometry),
            properties: Properties::new(),
        }),
        other => other,
    }
}

fn element(args: &mut Args, arg: &str) -> Result<Data, EvalError> {
    let data = args.take(arg);
    if data.properties().is_none() {
        return Err(args.fail(format!("'{}' must be an element, got {}", arg, data.type_name())));
    }
    Ok(data)
}

pub(crate) fn call(ev: &LocalEvaluator, args: &mut Args) -> Result<Data, EvalError> {
    Ok(match args.function() {
        "Collection" => Data::Collection(CollectionData {
            elements: args.elements("features")?.into_iter().map(as_element).collect(),
            properties: Properties::new(),
        }),
        "Collection.size" => num(args.collection("collection")?.elements.len() as f64),
        "Collection.toList" => {
            let elements = args.collection("collection")?.elements;
            let count = args.int("count")?.max(0) as usize;
            let offset = args.optional_int("offset")?.unwrap_or(0).max(0) as usize;
            Data::List(elements.into_iter().skip(offset).take(count).collect())
        }
        "Collection.first" => args
            .collection("collection")?
            .elements
            .into_iter()
            .next()
            .ok_or_else(|| args.fail("empty collection"))?,
        "Collection.filter" => {
            let mut collection = args.collection("collection")?;
            let filter = args.filter("filter")?;
            collection.elements.retain(|e| filter.accepts(e));
            Data::Collection(collection)
        }
        "Collection.merge" => {
            let mut first = args.collection("collection1")?;
            first.elements.extend(args.collection("collection2")?.elements);
            Data::Collection(first)
        }
        "Collection.map" => {
            let collection = args.collection("collection")?;
            let closure = args.closure("baseAlgorithm")?;
            let drop_nulls = args.bool("dropNulls")?;
            let elements = ev.map(collection.elements, &closure, drop_nulls)?;
            Data::Collection(CollectionData {
                elements: elements.into_iter().map(as_element).collect(),
                properties: collection.properties,
            })
        }
        "Collection.iterate" => {
            let collection = args.collection("collection")?;
            let closure = args.closure("function")?;
            let first = args.take("first");
            ev.iterate(collection.elements, &closure, first)?
        }
        "Collection.geometry" => {
            let collection = args.collection("collection")?;
            let parts: Vec<Geom> = collection
                .elements
                .into_iter()
                .filter_map(|e| match e {
                    Data::Feature(feature) => feature.geometry,
                    _ => None,
                })
                .collect();
            Data::Geometry(Geom::Multi(parts).dissolve())
        }
        "Element.get" => {
            let object = element(args, "object")?;
            let property = args.text("property")?;
            object
                .properties()
                .and_then(|p| p.get(&property))
                .cloned()
                .unwrap_or_default()
        }
        "Element.set" => {
            let mut object = element(args, "object")?;
            let key = args.text("key")?;
            let value = args.take("value");
            if let Some(properties) = object.properties_mut() {
                properties.insert(key, value);
            }
            object
        }
        "Element.copyProperties" => {
            let mut destination = element(args, "destination")?;
            let source = element(args, "source")?;
            let wanted = args.optional_list("properties")?;
            let copied: Properties = source
                .properties()
                .into_iter()
                .flatten()
                .filter(|(k, _)| match &wanted {
                    Some(names) => names.contains(&Data::Text(k.to_string())),
                    None => !k.starts_with("system:"),
                })
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            if let Some(properties) = destination.properties_mut() {
                properties.extend(copied);
            }
            destination
        }
        "Feature" => {
            let geometry = match args.take("geometry") {
                Data::Null => None,
                Data::Geometry(geometry) => Some(geometry),
                Data::Feature(feature) => feature.geometry,
                other => return Err(args.fail(format!("cannot build a feature from a {}", other.type_name()))),
            };
            let properties = args.optional_dict("metadata")?.unwrap_or_default();
            Data::Feature(FeatureData { geometry, properties })
        }
        "Feature.geometry" => args
            .feature("feature")?
            .geometry
            .map(Data::Geometry)
            .ok_or_else(|| args.fail("feature has no geometry"))?,
        name @ ("Filter.equals" | "Filter.notEquals") => Data::Filter(FilterData {
            field: args.text("leftField")?,
            value: Box::new(args.take("rightValue")),
            negate: name == "Filter.notEquals",
        }),
        other => return Err(EvalError::Unsupported(other.to_string())),
    })
}
