use async_trait::async_trait;

use crate::models::Coordinate;

/// Port for reverse geocoding a map position.
///
/// Lookups are best-effort: implementations never fail and fall back to
/// [`Coordinate::display_short`] when the upstream lookup does not succeed.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a coordinate into a display address
    async fn reverse(&self, coordinate: Coordinate) -> String;
}
