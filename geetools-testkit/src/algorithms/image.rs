//! `Image.*`, `ImageCollection.*`, `Projection.*` and `Reducer.*`

use super::num;
use crate::args::Args;
use crate::data::{Band, CollectionData, Data, ImageData};
use crate::error::EvalError;
use crate::eval::LocalEvaluator;
use crate::geom::{intersection, METERS_PER_DEGREE};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

pub(crate) fn call(ev: &LocalEvaluator, args: &mut Args) -> Result<Data, EvalError> {
    Ok(match args.function() {
        "Image.load" => Data::Image(ev.asset(&args.text("id")?)?),
        "Image.constant" => {
            let values = match args.take("value") {
                Data::Number(n) => vec![n],
                Data::List(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Data::Number(n) => Ok(n),
                        other => Err(args.fail(format!("constant values must be numbers, got {}", other.type_name()))),
                    })
                    .collect::<Result<_, _>>()?,
                other => return Err(args.fail(format!("cannot build a constant from a {}", other.type_name()))),
            };
            let bands = values
                .into_iter()
                .enumerate()
                .map(|(i, value)| Band {
                    name: if i == 0 { "constant".to_string() } else { format!("constant_{}", i) },
                    value,
                    scale: METERS_PER_DEGREE,
                    footprint: None,
                    masked: false,
                })
                .collect();
            Data::Image(ImageData {
                bands,
                properties: BTreeMap::new(),
            })
        }
        "Image.bandNames" => Data::List(
            args.image("image")?
                .bands
                .into_iter()
                .map(|b| Data::Text(b.name))
                .collect(),
        ),
        "Image.select" => {
            let image = args.image("input")?;
            let selectors = args.names("bandSelectors")?;
            Data::Image(select(args, image, &selectors)?)
        }
        "Image.rename" => {
            let image = args.image("input")?;
            let names = args.list("names")?;
            Data::Image(rename(args, image, names)?)
        }
        "Image.addBands" => {
            let mut dst = args.image("dstImg")?;
            let src = args.image("srcImg")?;
            let mut seen: HashSet<String> = dst.bands.iter().map(|b| b.name.clone()).collect();
            for band in src.bands {
                if !seen.insert(band.name.clone()) {
                    return Err(args.fail(format!("duplicate band name '{}'", band.name)));
                }
                dst.bands.push(band);
            }
            Data::Image(dst)
        }
        "Image.reduceRegion" => {
            let image = args.image("image")?;
            args.take("reducer");
            let region = match args.optional_geometry("geometry")? {
                Some(geometry) => geometry,
                None => image.footprint(),
            };
            let bbox = region.bbox().ok_or_else(|| args.fail("empty region"))?;
            Data::Dict(
                image
                    .bands
                    .into_iter()
                    .map(|band| {
                        let value = if band.covers(&bbox) { Data::Number(band.value) } else { Data::Null };
                        (band.name, value)
                    })
                    .collect(),
            )
        }
        "Image.clip" => {
            let mut image = args.image("input")?;
            let bbox = args.geometry("geometry")?.bbox().ok_or_else(|| args.fail("empty geometry"))?;
            for band in &mut image.bands {
                let current = band.footprint.unwrap_or([-180.0, -90.0, 180.0, 90.0]);
                match intersection(&current, &bbox) {
                    Some(clipped) => band.footprint = Some(clipped),
                    None => band.masked = true,
                }
            }
            Data::Image(image)
        }
        "Image.projection" => {
            let image = args.image("image")?;
            let band = image.bands.first().ok_or_else(|| args.fail("image has no bands"))?;
            Data::Projection(band.scale)
        }
        "Image.geometry" => Data::Geometry(args.image("feature")?.footprint()),
        "Image.date" => {
            let image = args.image("image")?;
            match image.properties.get("system:time_start") {
                Some(Data::Number(n)) => Data::Date(n.as_f64() as i64),
                _ => return Err(args.fail("image has no 'system:time_start' property")),
            }
        }
        "ImageCollection.fromImages" => {
            let elements = args.list("images")?;
            if let Some(other) = elements.iter().find(|e| !matches!(e, Data::Image(_))) {
                return Err(args.fail(format!("expected images, got {}", other.type_name())));
            }
            Data::Collection(CollectionData {
                elements,
                properties: BTreeMap::new(),
            })
        }
        "ImageCollection.toBands" => {
            let collection = args.collection("collection")?;
            let mut bands = Vec::new();
            for (i, element) in collection.elements.into_iter().enumerate() {
                let image = match element {
                    Data::Image(image) => image,
                    other => return Err(args.fail(format!("expected images, got {}", other.type_name()))),
                };
                let index = match image.properties.get("system:index") {
                    Some(Data::Text(index)) => index.clone(),
                    _ => i.to_string(),
                };
                bands.extend(image.bands.into_iter().map(|band| Band {
                    name: format!("{}_{}", index, band.name),
                    ..band
                }));
            }
            Data::Image(ImageData {
                bands,
                properties: BTreeMap::new(),
            })
        }
        "Projection.nominalScale" => num(args.projection("proj")?),
        "Projection.scale" => {
            let scale = args.projection("projection")?;
            let x = args.float("x")?;
            let y = args.float("y")?;
            if x != y {
                return Err(args.fail("only uniform scaling is supported"));
            }
            Data::Projection(scale * x)
        }
        name @ ("Reducer.first" | "Reducer.min") => Data::Reducer(name.to_string()),
        other => return Err(EvalError::Unsupported(other.to_string())),
    })
}

/// Bands matching each selector, in selector order. A selector is a band
/// name or a regular expression matched against the whole name.
fn select(args: &Args, image: ImageData, selectors: &[String]) -> Result<ImageData, EvalError> {
    let mut bands = Vec::new();
    for selector in selectors {
        let pattern = Regex::new(&format!("^(?:{})$", selector)).ok();
        let matched: Vec<&Band> = image
            .bands
            .iter()
            .filter(|b| &b.name == selector || pattern.as_ref().is_some_and(|p| p.is_match(&b.name)))
            .collect();
        if matched.is_empty() {
            let available: Vec<&str> = image.bands.iter().map(|b| b.name.as_str()).collect();
            return Err(args.fail(format!(
                "band pattern '{}' did not match any bands, available bands: [{}]",
                selector,
                available.join(", ")
            )));
        }
        bands.extend(matched.into_iter().cloned());
    }
    Ok(ImageData {
        bands,
        properties: image.properties,
    })
}

fn rename(args: &Args, mut image: ImageData, names: Vec<Data>) -> Result<ImageData, EvalError> {
    if names.len() != image.bands.len() {
        return Err(args.fail(format!(
            "got {} names for {} bands",
            names.len(),
            image.bands.len()
        )));
    }
    let mut seen = HashSet::new();
    for (band, name) in image.bands.iter_mut().zip(names) {
        match name {
            Data::Text(name) => {
                if !seen.insert(name.clone()) {
                    return Err(args.fail(format!("duplicate band name '{}'", name)));
                }
                band.name = name
            }
            other => return Err(args.fail(format!("band names must be strings, got {}", other.type_name()))),
        }
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use geetools_core::{Evaluate, Image};
    use serde_json::json;

    #[test]
    fn test_select_by_regex_keeps_selector_order() {
        let ev = fixtures::evaluator();
        let image = Image::load(fixtures::S2_ID).select(vec!["B3", "B[12]"]);
        assert_eq!(ev.get_info(&image.band_names()).unwrap(), json!(["B3", "B1", "B2"]));
    }

    #[test]
    fn test_select_unknown_band_fails() {
        let ev = fixtures::evaluator();
        let image = Image::load(fixtures::S2_ID).select(vec!["B99"]);
        let err = ev.get_info(&image.band_names()).unwrap_err();
        assert!(err.to_string().contains("B99"));
    }

    #[test]
    fn test_constant_band_names() {
        let ev = fixtures::evaluator();
        let image = Image::constant(vec![1.0, 2.0, 3.0]);
        assert_eq!(
            ev.get_info(&image.band_names()).unwrap(),
            json!(["constant", "constant_1", "constant_2"])
        );
    }
}
