//! Conversions between field rings and `geo` crate types.
//!
//! `geo` works in `(x, y)`; rings are `(lat, lng)`. Longitude maps to `x`
//! and latitude to `y` so `geo` algorithms see conventional map axes.

use geo::{Coord, LineString, Polygon};

pub use agriscout_core::models::{Coordinate, Ring};

/// Convert a coordinate to a `geo::Coord`
pub fn to_geo_coord(coordinate: &Coordinate) -> Coord {
    Coord { x: coordinate.lng, y: coordinate.lat }
}

/// Convert a ring to a single-exterior `geo::Polygon`.
///
/// `geo` closes the exterior itself, so the open ring is passed through
/// unchanged.
pub fn to_geo_polygon(ring: &Ring) -> Polygon {
    let coords: Vec<Coord> = ring.iter().map(to_geo_coord).collect();
    Polygon::new(LineString::new(coords), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::from(vec![[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]])
    }

    #[test]
    fn test_axis_mapping() {
        let coord = to_geo_coord(&Coordinate::new(28.6, 77.2));
        assert_eq!(coord.x, 77.2);
        assert_eq!(coord.y, 28.6);
    }

    #[test]
    fn test_polygon_is_closed_by_geo() {
        let polygon = to_geo_polygon(&square());

        assert_eq!(polygon.exterior().0.len(), 5);
        assert_eq!(polygon.exterior().0[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(polygon.exterior().0[1], Coord { x: 2.0, y: 0.0 });
        assert!(polygon.interiors().is_empty());
    }
}
