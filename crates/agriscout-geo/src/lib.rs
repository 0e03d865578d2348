//! AgriScout Geo - Ring geometry, containment, and geocoding
//!
//! This crate holds the geometry validator used to accept or reject drawn
//! partitions, ring validation, area estimation, and the reverse geocoding
//! adapter.

pub mod area;
pub mod containment;
pub mod geocode;
pub mod models;
pub mod spatial;
pub mod validation;

pub use area::{GeodesicAreaEstimator, SQUARE_METRES_PER_ACRE};
pub use containment::{contains_with_mode, point_in_polygon, polygon_contains_polygon};
pub use geocode::NominatimGeocoder;
pub use spatial::{bounds_may_contain, ring_bounds, Bounds};
pub use validation::{ensure_valid_ring, validate_ring, ValidationResult};
