//! Named polygonal regions and their stored boundary form.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, BoundingRect, Coord, Intersects, Line, LineString, Polygon, Rect};
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use super::point::{CoordOrder, CoordValue, Point};
use crate::error::{ClassifyError, Result};

/// Boundary as held by external storage: ordered coordinate pairs, first
/// point not repeated at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub boundary: Vec<Vec<CoordValue>>,
}

/// A named simple polygon.
///
/// Always holds at least 3 distinct vertices with non-zero area and no
/// self-intersections. The ring is implicitly closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    vertices: Vec<Point>,
    bbox: Rect<f64>,
}

impl Region {
    /// Build a region from its vertices, validating the ring
    pub fn new(name: impl Into<String>, vertices: Vec<Point>) -> Result<Self> {
        let name = name.into();
        let vertices = normalize_ring(vertices);

        if vertices.len() < 3 {
            return Err(ClassifyError::invalid_region(
                &name,
                format!("needs at least 3 distinct vertices, got {}", vertices.len()),
            ));
        }

        let polygon = validate_ring(&name, &vertices)?;
        let bbox = polygon
            .bounding_rect()
            .ok_or_else(|| ClassifyError::invalid_region(&name, "empty boundary"))?;

        Ok(Self {
            name,
            vertices,
            bbox,
        })
    }

    /// Rebuild a region from its stored boundary
    pub fn from_record(record: &RegionRecord, order: CoordOrder) -> Result<Self> {
        let vertices = record
            .boundary
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                Point::from_pair(pair, order).map_err(|e| {
                    ClassifyError::invalid_region(&record.name, format!("vertex {}: {}", i, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Region::new(record.name.clone(), vertices)
    }

    /// Convert back to the stored boundary form
    pub fn to_record(&self, order: CoordOrder) -> RegionRecord {
        RegionRecord {
            name: self.name.clone(),
            boundary: self
                .vertices
                .iter()
                .map(|p| p.to_pair(order).into_iter().map(CoordValue::from).collect())
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Bounding box in planar (lon, lat) space
    pub fn bbox(&self) -> Rect<f64> {
        self.bbox
    }

    /// Iterate over edges `(v[i], v[i + 1 mod n])`
    pub fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        let next = self.vertices.iter().cycle().skip(1);
        self.vertices.iter().zip(next)
    }

    /// Convert into a `geo` polygon (closed ring, no holes)
    pub fn to_polygon(&self) -> Polygon<f64> {
        ring_polygon(&self.vertices)
    }
}

fn ring_polygon(vertices: &[Point]) -> Polygon<f64> {
    let ring: LineString<f64> = vertices.iter().map(|p| Coord::from(*p)).collect();
    Polygon::new(ring, vec![])
}

/// Drop repeated consecutive vertices and a closing vertex equal to the first.
fn normalize_ring(mut vertices: Vec<Point>) -> Vec<Point> {
    vertices.dedup();
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

/// R-tree entry for one boundary edge
struct IndexedEdge {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedEdge {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn edge_envelope(line: &Line<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners([line.start.x, line.start.y], [line.end.x, line.end.y])
}

/// Check the ring forms a simple polygon and return it
fn validate_ring(name: &str, vertices: &[Point]) -> Result<Polygon<f64>> {
    if let Some(i) = vertices
        .iter()
        .position(|p| !p.lat.is_finite() || !p.lon.is_finite())
    {
        return Err(ClassifyError::invalid_region(
            name,
            format!("vertex {} is not finite", i),
        ));
    }

    let polygon = ring_polygon(vertices);
    if polygon.signed_area() == 0.0 {
        return Err(ClassifyError::invalid_region(name, "polygon has zero area"));
    }

    // edges[i] runs from vertex i to vertex i + 1
    let edges: Vec<Line<f64>> = polygon.exterior().lines().collect();
    let n = edges.len();

    // Adjacent edges share a vertex; overlapping beyond it means a spike
    for i in 0..n {
        let incoming = edges[(i + n - 1) % n];
        if let Some(LineIntersection::Collinear { intersection }) =
            line_intersection(incoming, edges[i])
        {
            if intersection.start != intersection.end {
                return Err(ClassifyError::invalid_region(
                    name,
                    format!("boundary doubles back at vertex {}", i),
                ));
            }
        }
    }

    // Non-adjacent edges must not touch; only envelope overlaps are tested
    let tree = RTree::bulk_load(
        edges
            .iter()
            .enumerate()
            .map(|(index, line)| IndexedEdge {
                index,
                envelope: edge_envelope(line),
            })
            .collect(),
    );

    for (i, line) in edges.iter().enumerate() {
        let adjacent = |j: usize| j == (i + 1) % n || i == (j + 1) % n;
        let crossing = tree
            .locate_in_envelope_intersecting(&edge_envelope(line))
            .map(|candidate| candidate.index)
            .filter(|&j| j > i && !adjacent(j))
            .find(|&j| line.intersects(&edges[j]));

        if let Some(j) = crossing {
            return Err(ClassifyError::invalid_region(
                name,
                format!("edges {} and {} intersect", i, j),
            ));
        }
    }

    Ok(polygon)
}
