use crate::models::Ring;

/// Port for estimating the area of a drawn ring.
///
/// This stands in for the remote-sensing pipeline that will eventually
/// measure plots from satellite imagery.
pub trait AreaEstimator: Send + Sync {
    /// Estimated area in acres; rings with fewer than three vertices are 0
    fn estimate_acres(&self, ring: &Ring) -> f64;
}
