//! Coordinates and rings drawn on the map.
//!
//! Coordinates are WGS84 degrees. Containment math treats latitude and
//! longitude as a plane, which only holds for small plots. Area is
//! measured geodesically.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of vertices for a ring to describe a polygon
pub const MIN_RING_VERTICES: usize = 3;

/// A map position in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Short human-readable form, also used as the geocoding fallback
    pub fn display_short(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl From<[f64; 2]> for Coordinate {
    /// Interprets the pair as `[lat, lng]`
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Ordered, open polygon boundary (the first vertex is not repeated).
///
/// A ring is not guaranteed to be simple; self-intersecting input is stored
/// as drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Coordinate>);

impl Ring {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self(vertices)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Has enough vertices to be treated as a polygon
    pub fn is_polygon(&self) -> bool {
        self.0.len() >= MIN_RING_VERTICES
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Coordinate> {
        self.0.iter()
    }

    pub fn push(&mut self, coordinate: Coordinate) {
        self.0.push(coordinate);
    }

    pub fn pop(&mut self) -> Option<Coordinate> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Move the vertices out, leaving the ring empty
    pub fn take(&mut self) -> Ring {
        Ring(std::mem::take(&mut self.0))
    }

    pub fn into_vertices(self) -> Vec<Coordinate> {
        self.0
    }
}

impl From<Vec<Coordinate>> for Ring {
    fn from(vertices: Vec<Coordinate>) -> Self {
        Self(vertices)
    }
}

impl From<Vec<[f64; 2]>> for Ring {
    fn from(pairs: Vec<[f64; 2]>) -> Self {
        Self(pairs.into_iter().map(Coordinate::from).collect())
    }
}

impl FromIterator<Coordinate> for Ring {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
