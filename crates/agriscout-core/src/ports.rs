//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod estimation;
pub mod geocoding;

pub use estimation::AreaEstimator;
pub use geocoding::Geocoder;
