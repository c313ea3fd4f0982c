//! Ray-casting point-in-polygon test.
//!
//! A horizontal ray is cast from the query point towards +x and the edge
//! crossings are counted (even-odd rule). Edges are half-open on y, so a ray
//! passing exactly through a vertex is counted once. Points lying exactly on
//! an edge or vertex never reach the crossing count; they are resolved by a
//! [`BoundaryRule`].
//!
//! Boundary detection uses exact floating-point comparisons.

use serde::{Deserialize, Serialize};

use crate::models::{Point, Region};

/// How to classify a point lying exactly on a region's boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Edge and vertex points belong to the region
    #[default]
    Inside,
    /// Edge and vertex points are outside the region
    Outside,
}

/// Test whether `point` lies in `polygon`, boundary counted as inside
pub fn contains(polygon: &Region, point: &Point) -> bool {
    contains_with(polygon, point, BoundaryRule::Inside)
}

/// Test whether `point` lies in `polygon` under an explicit boundary rule
pub fn contains_with(polygon: &Region, point: &Point, rule: BoundaryRule) -> bool {
    let bbox = polygon.bbox();
    let (px, py) = (point.x(), point.y());
    if px < bbox.min().x || px > bbox.max().x || py < bbox.min().y || py > bbox.max().y {
        return false;
    }

    let mut inside = false;
    for (a, b) in polygon.edges() {
        if on_segment(a, b, point) {
            return rule == BoundaryRule::Inside;
        }

        if (a.y() > py) != (b.y() > py) {
            let x_cross = a.x() + (py - a.y()) * (b.x() - a.x()) / (b.y() - a.y());
            if px < x_cross {
                inside = !inside;
            }
        }
    }

    inside
}

/// Twice the signed area of triangle (a, b, c); zero when collinear
fn orient(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x() - a.x()) * (c.y() - a.y()) - (b.y() - a.y()) * (c.x() - a.x())
}

/// Whether `p` lies on the closed segment `a`-`b`
fn on_segment(a: &Point, b: &Point, p: &Point) -> bool {
    orient(a, b, p) == 0.0
        && p.x() >= a.x().min(b.x())
        && p.x() <= a.x().max(b.x())
        && p.y() >= a.y().min(b.y())
        && p.y() <= a.y().max(b.y())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;

    fn region(name: &str, coords: &[(f64, f64)]) -> Region {
        let vertices = coords
            .iter()
            .map(|&(lat, lon)| Point { lat, lon })
            .collect();
        Region::new(name, vertices).unwrap()
    }

    fn pt(lat: f64, lon: f64) -> Point {
        Point { lat, lon }
    }

    fn square() -> Region {
        region("D1", &[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
    }

    #[test]
    fn test_square_inside_outside() {
        let sq = square();
        assert!(contains(&sq, &pt(5.0, 5.0)));
        assert!(!contains(&sq, &pt(15.0, 15.0)));
        assert!(!contains(&sq, &pt(-0.1, 5.0)));
        assert!(!contains(&sq, &pt(5.0, 10.1)));
    }

    #[test]
    fn test_vertices_follow_boundary_rule() {
        let sq = square();
        for v in sq.vertices().to_vec() {
            assert!(contains_with(&sq, &v, BoundaryRule::Inside));
            assert!(!contains_with(&sq, &v, BoundaryRule::Outside));
        }
    }

    #[test]
    fn test_edges_follow_boundary_rule() {
        let sq = square();
        let on_edges = [pt(0.0, 5.0), pt(10.0, 5.0), pt(5.0, 0.0), pt(5.0, 10.0)];
        for p in &on_edges {
            assert!(contains(&sq, p), "{:?} should be inside", p);
            assert!(!contains_with(&sq, p, BoundaryRule::Outside));
        }
    }

    #[test]
    fn test_ray_through_vertex() {
        // Diamond: a ray from the centre passes exactly through the right vertex
        let diamond = region("diamond", &[(0.0, 5.0), (5.0, 10.0), (10.0, 5.0), (5.0, 0.0)]);
        assert!(contains(&diamond, &pt(5.0, 5.0)));
        assert!(contains(&diamond, &pt(5.0, 1.0)));
        assert!(!contains(&diamond, &pt(5.0, -1.0)));
        assert!(!contains(&diamond, &pt(9.0, 9.0)));
    }

    #[test]
    fn test_concave_notch() {
        // L-shape missing the upper right quadrant
        let l = region(
            "L",
            &[
                (0.0, 0.0),
                (0.0, 10.0),
                (5.0, 10.0),
                (5.0, 5.0),
                (10.0, 5.0),
                (10.0, 0.0),
            ],
        );
        assert!(contains(&l, &pt(2.0, 8.0)));
        assert!(contains(&l, &pt(8.0, 2.0)));
        assert!(!contains(&l, &pt(8.0, 8.0)));
    }

    #[test]
    fn test_convex_interior_points() {
        let hexagon = region(
            "hex",
            &[
                (0.0, 2.0),
                (0.0, 6.0),
                (3.0, 8.0),
                (6.0, 6.0),
                (6.0, 2.0),
                (3.0, 0.0),
            ],
        );
        // Strict convex combinations of vertices
        let verts = hexagon.vertices().to_vec();
        for i in 0..verts.len() {
            let a = verts[i];
            let b = verts[(i + 2) % verts.len()];
            let c = verts[(i + 4) % verts.len()];
            let p = pt(
                (a.lat + b.lat + c.lat) / 3.0,
                (a.lon + b.lon + c.lon) / 3.0,
            );
            assert!(contains(&hexagon, &p));
        }

        // Outside the bounding box
        assert!(!contains(&hexagon, &pt(7.0, 4.0)));
        assert!(!contains(&hexagon, &pt(3.0, -0.5)));
    }

    #[test]
    fn test_agrees_with_geo_off_boundary() {
        let l = region(
            "L",
            &[
                (0.0, 0.0),
                (0.0, 10.0),
                (5.0, 10.0),
                (5.0, 5.0),
                (10.0, 5.0),
                (10.0, 0.0),
            ],
        );
        let polygon = l.to_polygon();
        for lat in 0..24 {
            for lon in 0..24 {
                // Half-unit offsets keep every sample off the boundary
                let p = pt(lat as f64 * 0.5 - 0.75, lon as f64 * 0.5 - 0.75);
                let expected = polygon.contains(&geo::Point::from(p));
                assert_eq!(contains(&l, &p), expected, "mismatch at {:?}", p);
            }
        }
    }

    #[test]
    fn test_sloped_edges_follow_boundary_rule() {
        let diamond = region("diamond", &[(0.0, 5.0), (5.0, 10.0), (10.0, 5.0), (5.0, 0.0)]);

        // Points on three of the sloped edges, exactly representable
        let on_edges = [pt(2.5, 7.5), pt(1.0, 6.0), pt(7.0, 8.0), pt(7.5, 2.5)];
        for p in &on_edges {
            assert!(contains(&diamond, p), "{:?} should be inside", p);
            assert!(
                !contains_with(&diamond, p, BoundaryRule::Outside),
                "{:?} should be outside",
                p
            );
        }

        // Quarter-unit either side of the lower right edge
        assert!(contains_with(&diamond, &pt(2.5, 7.25), BoundaryRule::Outside));
        assert!(!contains(&diamond, &pt(2.5, 7.75)));
    }
}
