use geo::algorithm::bounding_rect::BoundingRect;
use geo::Rect;
use serde::{Deserialize, Serialize};

use crate::models::{to_geo_polygon, Coordinate, Ring};

/// Axis-aligned bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl Bounds {
    fn from_rect(rect: Rect) -> Self {
        Self {
            min_lat: rect.min().y,
            min_lng: rect.min().x,
            max_lat: rect.max().y,
            max_lng: rect.max().x,
        }
    }

    /// Check if the box fully covers `other`
    pub fn covers(&self, other: &Bounds) -> bool {
        self.min_lat <= other.min_lat
            && self.min_lng <= other.min_lng
            && self.max_lat >= other.max_lat
            && self.max_lng >= other.max_lng
    }

    /// Midpoint of the box
    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.min_lat + self.max_lat) / 2.0, (self.min_lng + self.max_lng) / 2.0)
    }
}

/// Bounding box of a ring; `None` for an empty ring
pub fn ring_bounds(ring: &Ring) -> Option<Bounds> {
    if ring.is_empty() {
        return None;
    }
    to_geo_polygon(ring).bounding_rect().map(Bounds::from_rect)
}

/// Cheap pre-check before a full containment test
pub fn bounds_may_contain(outer: &Ring, inner: &Ring) -> bool {
    match (ring_bounds(outer), ring_bounds(inner)) {
        (Some(outer), Some(inner)) => outer.covers(&inner),
        _ => false,
    }
}
