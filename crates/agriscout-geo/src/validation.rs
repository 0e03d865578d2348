use crate::models::Ring;
use agriscout_core::error::{AgriError, Result};
use agriscout_core::models::MIN_RING_VERTICES;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// First reason, joined with its location
    pub fn summary(&self) -> Option<String> {
        self.errors.first().map(|e| format!("{}: {}", e.location, e.reason))
    }
}

/// Check that a ring can be committed as a land or partition.
///
/// Rules:
/// - at least three vertices
/// - every coordinate finite
/// - latitude within [-90, 90], longitude within [-180, 180]
///
/// Self-intersection is not checked.
pub fn validate_ring(ring: &Ring) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if ring.len() < MIN_RING_VERTICES {
        result.add_error(
            "Ring".to_string(),
            format!("Ring must have at least {} vertices, found {}", MIN_RING_VERTICES, ring.len()),
        );
    }

    for (i, vertex) in ring.iter().enumerate() {
        if !vertex.is_finite() {
            result.add_error(format!("Ring[{}]", i), "Coordinates must be finite".to_string());
            continue;
        }
        if !(-90.0..=90.0).contains(&vertex.lat) {
            result.add_error(
                format!("Ring[{}]", i),
                format!("Latitude {} is outside [-90, 90]", vertex.lat),
            );
        }
        if !(-180.0..=180.0).contains(&vertex.lng) {
            result.add_error(
                format!("Ring[{}]", i),
                format!("Longitude {} is outside [-180, 180]", vertex.lng),
            );
        }
    }

    result
}

/// [`validate_ring`] as a `Result`, reporting the first problem
pub fn ensure_valid_ring(ring: &Ring) -> Result<()> {
    let validation = validate_ring(ring);
    if validation.is_valid {
        Ok(())
    } else {
        Err(AgriError::InvalidRing {
            reason: validation.summary().unwrap_or_else(|| "Invalid ring".to_string()),
        })
    }
}
