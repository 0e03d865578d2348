//! Area estimation for drawn rings.

use geo::GeodesicArea;

use crate::models::{to_geo_polygon, Ring};
use agriscout_core::models::MIN_RING_VERTICES;
use agriscout_core::ports::AreaEstimator;

/// Square metres per international acre
pub const SQUARE_METRES_PER_ACRE: f64 = 4_046.856_422_4;

/// Estimates area as the geodesic area of the ring on the WGS84 ellipsoid.
///
/// Self-intersecting rings yield the net signed area's magnitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicAreaEstimator;

impl GeodesicAreaEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Area of the ring in square metres
    pub fn square_metres(&self, ring: &Ring) -> f64 {
        if ring.len() < MIN_RING_VERTICES {
            return 0.0;
        }

        let area = to_geo_polygon(ring).geodesic_area_unsigned();
        if area.is_finite() {
            area
        } else {
            0.0
        }
    }
}

impl AreaEstimator for GeodesicAreaEstimator {
    fn estimate_acres(&self, ring: &Ring) -> f64 {
        self.square_metres(ring) / SQUARE_METRES_PER_ACRE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_rings_have_no_area() {
        let estimator = GeodesicAreaEstimator::new();
        assert_eq!(estimator.estimate_acres(&Ring::empty()), 0.0);
        assert_eq!(estimator.estimate_acres(&Ring::from(vec![[0.0, 0.0], [1.0, 1.0]])), 0.0);
    }

    #[test]
    fn test_equatorial_square() {
        // 0.001 degree is ~110.6 m of latitude and ~111.3 m of longitude at the equator
        let ring = Ring::from(vec![[0.0, 0.0], [0.0, 0.001], [0.001, 0.001], [0.001, 0.0]]);
        let acres = GeodesicAreaEstimator::new().estimate_acres(&ring);
        assert!((acres - 3.042).abs() < 0.01, "got {acres}");
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let estimator = GeodesicAreaEstimator::new();
        let equator = Ring::from(vec![[0.0, 0.0], [0.0, 0.01], [0.01, 0.01], [0.01, 0.0]]);
        let north = Ring::from(vec![[60.0, 0.0], [60.0, 0.01], [60.01, 0.01], [60.01, 0.0]]);

        let ratio = estimator.square_metres(&north) / estimator.square_metres(&equator);
        assert!((ratio - 0.5).abs() < 0.01, "got {ratio}");
    }

    #[test]
    fn test_winding_does_not_matter() {
        let estimator = GeodesicAreaEstimator::new();
        let clockwise = Ring::from(vec![[28.6, 77.2], [28.61, 77.2], [28.61, 77.21], [28.6, 77.21]]);
        let counter: Ring = clockwise.iter().rev().copied().collect();

        let a = estimator.estimate_acres(&clockwise);
        let b = estimator.estimate_acres(&counter);
        assert!(a > 0.0);
        assert!((a - b).abs() / a < 1e-9);
    }
}
