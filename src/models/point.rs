//! Canonical query point and coordinate-order handling.

use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, Result};

/// Order of the two numbers in an externally supplied coordinate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordOrder {
    /// `[lat, lon]`
    #[default]
    LatLon,
    /// `[lon, lat]` (GeoJSON order)
    LonLat,
}

/// One element of a stored coordinate pair.
///
/// Boundary data may hold numbers or numeric strings, e.g. `["53.34", -6.26]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordValue {
    Number(f64),
    Text(String),
}

impl CoordValue {
    /// Convert to a finite float, if possible
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            CoordValue::Number(n) => *n,
            CoordValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for CoordValue {
    fn from(value: f64) -> Self {
        CoordValue::Number(value)
    }
}

impl From<&str> for CoordValue {
    fn from(value: &str) -> Self {
        CoordValue::Text(value.to_string())
    }
}

/// Geographic point with named fields.
///
/// Planar computations treat `lon` as x and `lat` as y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    /// Create a point, rejecting NaN and infinite coordinates
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(ClassifyError::InvalidInput(format!(
                "non-finite coordinate ({}, {})",
                lat, lon
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Parse an external coordinate pair in the given order.
    ///
    /// An empty pair is the "no coordinates supplied" case and is reported as
    /// [`ClassifyError::InvalidInput`], as is anything that is not exactly two
    /// finite numbers.
    pub fn from_pair(pair: &[CoordValue], order: CoordOrder) -> Result<Self> {
        let (a, b) = match pair {
            [] => {
                return Err(ClassifyError::InvalidInput(
                    "no coordinates supplied".to_string(),
                ))
            }
            [a, b] => (a, b),
            other => {
                return Err(ClassifyError::InvalidInput(format!(
                    "expected 2 coordinates, got {}",
                    other.len()
                )))
            }
        };

        let (a, b) = match (a.to_f64(), b.to_f64()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(ClassifyError::InvalidInput(format!(
                    "coordinates {:?} are not finite numbers",
                    pair
                )))
            }
        };

        match order {
            CoordOrder::LatLon => Point::new(a, b),
            CoordOrder::LonLat => Point::new(b, a),
        }
    }

    /// Emit as a pair in the given order
    pub fn to_pair(&self, order: CoordOrder) -> [f64; 2] {
        match order {
            CoordOrder::LatLon => [self.lat, self.lon],
            CoordOrder::LonLat => [self.lon, self.lat],
        }
    }

    pub(crate) fn x(&self) -> f64 {
        self.lon
    }

    pub(crate) fn y(&self) -> f64 {
        self.lat
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::Coord { x: p.lon, y: p.lat }
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(p: Point) -> Self {
        geo::Point::new(p.lon, p.lat)
    }
}
