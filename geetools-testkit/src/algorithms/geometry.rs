//! `GeometryConstructors.*` and `Geometry.*`

use crate::args::Args;
use crate::data::{CollectionData, Data, FeatureData, Properties};
use crate::error::EvalError;
use crate::geom::{Geom, METERS_PER_DEGREE};

/// Upper bound on generated grid cells
const MAX_CELLS: usize = 10_000;

fn coordinate(args: &Args, data: &Data) -> Result<[f64; 2], EvalError> {
    match data {
        Data::List(xy) => match xy.as_slice() {
            [Data::Number(x), Data::Number(y)] => Ok([x.as_f64(), y.as_f64()]),
            _ => Err(args.fail("coordinates must be [x, y] pairs")),
        },
        _ => Err(args.fail("coordinates must be [x, y] pairs")),
    }
}

fn numbers(args: &Args, items: &[Data]) -> Result<Vec<f64>, EvalError> {
    items
        .iter()
        .map(|item| match item {
            Data::Number(n) => Ok(n.as_f64()),
            other => Err(args.fail(format!("expected a number, got {}", other.type_name()))),
        })
        .collect()
}

pub(crate) fn call(args: &mut Args) -> Result<Data, EvalError> {
    Ok(Data::Geometry(match args.function() {
        "GeometryConstructors.Point" => {
            let coordinates = args.list("coordinates")?;
            match numbers(args, &coordinates)?.as_slice() {
                [x, y] => Geom::Point([*x, *y]),
                _ => return Err(args.fail("a point needs two coordinates")),
            }
        }
        "GeometryConstructors.Rectangle" => {
            let coordinates = args.list("coordinates")?;
            match numbers(args, &coordinates)?.as_slice() {
                [xmin, ymin, xmax, ymax] if xmin <= xmax && ymin <= ymax => {
                    Geom::rectangle([*xmin, *ymin, *xmax, *ymax])
                }
                _ => return Err(args.fail("a rectangle needs [xmin, ymin, xmax, ymax]")),
            }
        }
        "GeometryConstructors.Polygon" => {
            let rings = args.list("coordinates")?;
            let exterior = match rings.first() {
                Some(Data::List(ring)) => ring
                    .iter()
                    .map(|c| coordinate(args, c))
                    .collect::<Result<Vec<_>, _>>()?,
                _ => return Err(args.fail("a polygon needs at least one ring")),
            };
            if exterior.len() < 3 {
                return Err(args.fail("a ring needs at least three vertices"));
            }
            let mut ring = exterior;
            if ring.first() != ring.last() {
                ring.push(ring[0]);
            }
            Geom::Polygon(ring)
        }
        "GeometryConstructors.MultiGeometry" => Geom::Multi(
            args.list("geometries")?
                .into_iter()
                .map(|g| match g {
                    Data::Geometry(geom) => Ok(geom),
                    other => Err(args.fail(format!("expected geometries, got {}", other.type_name()))),
                })
                .collect::<Result<_, _>>()?,
        ),
        "Geometry.type" => return Ok(Data::Text(args.geometry("geometry")?.type_name().to_string())),
        "Geometry.geometries" => {
            return Ok(Data::List(
                args.geometry("geometry")?.parts().into_iter().map(Data::Geometry).collect(),
            ))
        }
        "Geometry.union" => {
            let left = args.geometry("left")?;
            left.union(&args.geometry("right")?)
        }
        "Geometry.dissolve" => args.geometry("geometry")?.dissolve(),
        "Geometry.buffer" => {
            let geometry = args.geometry("geometry")?;
            let distance = args.float("distance")?;
            geometry.buffer(distance).ok_or_else(|| args.fail("cannot buffer an empty geometry"))?
        }
        "Geometry.coveringGrid" => {
            let geometry = args.geometry("geometry")?;
            let scale = args.projection("projection")?;
            return covering_grid(args, &geometry, scale);
        }
        other => return Err(EvalError::Unsupported(other.to_string())),
    }))
}

/// Square cells of `scale` meters aligned on the origin, one feature per
/// cell intersecting the geometry's bounding box
fn covering_grid(args: &Args, geometry: &Geom, scale: f64) -> Result<Data, EvalError> {
    let bbox = geometry.bbox().ok_or_else(|| args.fail("empty geometry"))?;
    let cell = scale / METERS_PER_DEGREE;
    let span = |min: f64, max: f64| {
        let first = (min / cell).floor() as i64;
        let last = ((max / cell).ceil() as i64 - 1).max(first);
        first..=last
    };
    let (xs, ys) = (span(bbox[0], bbox[2]), span(bbox[1], bbox[3]));
    let count = xs.clone().count() * ys.clone().count();
    if count > MAX_CELLS {
        return Err(args.fail(format!("grid of {} cells exceeds the limit of {}", count, MAX_CELLS)));
    }

    let mut elements = Vec::with_capacity(count);
    for j in ys {
        for i in xs.clone() {
            let (x, y) = (i as f64 * cell, j as f64 * cell);
            elements.push(Data::Feature(FeatureData {
                geometry: Some(Geom::rectangle([x, y, x + cell, y + cell])),
                properties: Properties::new(),
            }));
        }
    }
    Ok(Data::Collection(CollectionData {
        elements,
        properties: Properties::new(),
    }))
}

#[cfg(test)]
mod tests {
    use geetools_core::{Evaluate, Geometry, Value};
    use serde_json::json;

    #[test]
    fn test_geometry_collection_parts() {
        let ev = crate::LocalEvaluator::new();
        let multi = Geometry::multi(Value::List(vec![
            Geometry::point(0.0, 0.0).into(),
            Geometry::rectangle(1.0, 1.0, 2.0, 2.0).into(),
        ]));
        assert_eq!(ev.get_info(&multi.geometry_type()).unwrap(), json!("GeometryCollection"));
        assert_eq!(ev.get_info(&multi.geometries().size()).unwrap(), json!(2));
    }
}
