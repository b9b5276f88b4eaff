//! Planar geometry model
//!
//! Geometries are kept as points, single-ring polygons and collections.
//! Spatial predicates work on bounding boxes, which is enough for the
//! footprint and grid checks the helpers need.

use serde_json::{json, Value as Json};

/// `[xmin, ymin, xmax, ymax]` in degrees
pub type BBox = [f64; 4];

/// Meters per degree at the equator, used to turn metric sizes into degrees
pub const METERS_PER_DEGREE: f64 = 111_319.490_793_273_57;

pub fn intersection(a: &BBox, b: &BBox) -> Option<BBox> {
    let out = [a[0].max(b[0]), a[1].max(b[1]), a[2].min(b[2]), a[3].min(b[3])];
    (out[0] <= out[2] && out[1] <= out[3]).then_some(out)
}

fn cover(a: &BBox, b: &BBox) -> BBox {
    [a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geom {
    Point([f64; 2]),
    /// Exterior ring, closed
    Polygon(Vec<[f64; 2]>),
    Multi(Vec<Geom>),
}

impl Geom {
    pub fn rectangle(b: BBox) -> Geom {
        Geom::Polygon(vec![[b[0], b[1]], [b[2], b[1]], [b[2], b[3]], [b[0], b[3]], [b[0], b[1]]])
    }

    /// Whole world, the footprint of unbounded images
    pub fn world() -> Geom {
        Geom::rectangle([-180.0, -90.0, 180.0, 90.0])
    }

    /// GeoJSON type
    pub fn type_name(&self) -> &'static str {
        match self {
            Geom::Point(_) => "Point",
            Geom::Polygon(_) => "Polygon",
            Geom::Multi(_) => "GeometryCollection",
        }
    }

    pub fn bbox(&self) -> Option<BBox> {
        match self {
            Geom::Point([x, y]) => Some([*x, *y, *x, *y]),
            Geom::Polygon(ring) => ring.iter().fold(None, |acc, [x, y]| {
                let b = [*x, *y, *x, *y];
                Some(acc.map_or(b, |a| cover(&a, &b)))
            }),
            Geom::Multi(parts) => parts
                .iter()
                .filter_map(Geom::bbox)
                .reduce(|a, b| cover(&a, &b)),
        }
    }

    /// Inner geometries; a simple geometry is its own only part
    pub fn parts(&self) -> Vec<Geom> {
        match self {
            Geom::Multi(parts) => parts.clone(),
            other => vec![other.clone()],
        }
    }

    pub fn union(&self, other: &Geom) -> Geom {
        let mut parts = self.parts();
        parts.extend(other.parts());
        Geom::Multi(parts).dissolve()
    }

    /// Merge parts whose bounding boxes touch; a single remaining part is
    /// returned as is
    pub fn dissolve(&self) -> Geom {
        let mut merged: Vec<Geom> = Vec::new();
        for part in self.parts() {
            let mut current = part;
            loop {
                let Some(bbox) = current.bbox() else { break };
                let hit = merged.iter().position(|m| {
                    m.bbox().is_some_and(|other| intersection(&bbox, &other).is_some())
                });
                match hit {
                    Some(index) => {
                        let other = merged.remove(index);
                        if current != other {
                            if let Some(b) = other.bbox() {
                                current = Geom::rectangle(cover(&bbox, &b));
                            }
                        }
                    }
                    None => break,
                }
            }
            merged.push(current);
        }
        if merged.len() == 1 {
            merged.remove(0)
        } else {
            Geom::Multi(merged)
        }
    }

    /// Grow by `meters` on every side; the result is the grown bounding box
    pub fn buffer(&self, meters: f64) -> Option<Geom> {
        let d = meters / METERS_PER_DEGREE;
        self.bbox().map(|b| Geom::rectangle([b[0] - d, b[1] - d, b[2] + d, b[3] + d]))
    }

    pub fn to_json(&self) -> Json {
        match self {
            Geom::Point([x, y]) => json!({"type": "Point", "coordinates": [x, y]}),
            Geom::Polygon(ring) => {
                let ring: Vec<Json> = ring.iter().map(|[x, y]| json!([x, y])).collect();
                json!({"type": "Polygon", "coordinates": [ring]})
            }
            Geom::Multi(parts) => json!({
                "type": "GeometryCollection",
                "geometries": parts.iter().map(Geom::to_json).collect::<Vec<_>>(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dissolve_merges_overlapping_boxes() {
        let a = Geom::rectangle([0.0, 0.0, 2.0, 2.0]);
        let b = Geom::rectangle([1.0, 1.0, 3.0, 3.0]);
        assert_eq!(a.union(&b), Geom::rectangle([0.0, 0.0, 3.0, 3.0]));
    }

    #[test]
    fn test_dissolve_keeps_disjoint_parts() {
        let a = Geom::rectangle([0.0, 0.0, 1.0, 1.0]);
        let b = Geom::rectangle([5.0, 5.0, 6.0, 6.0]);
        let union = a.union(&b);
        assert_eq!(union.type_name(), "GeometryCollection");
        assert_eq!(union.bbox(), Some([0.0, 0.0, 6.0, 6.0]));
    }

    #[test]
    fn test_point_bbox_intersects_polygon() {
        let point = Geom::Point([0.5, 0.5]).bbox().unwrap();
        assert!(intersection(&point, &[0.0, 0.0, 1.0, 1.0]).is_some());
        assert!(intersection(&point, &[2.0, 2.0, 3.0, 3.0]).is_none());
    }
}
