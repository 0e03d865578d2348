//! Check command implementation

use crate::cli::CheckArgs;
use crate::errors::invalid_ring_file;
use crate::output::OutputWriter;
use crate::output_types::{CheckOutput, RingSummary};
use agriscout_core::models::{ContainmentMode, Ring};
use agriscout_core::ports::AreaEstimator;
use agriscout_geo::{contains_with_mode, validate_ring, GeodesicAreaEstimator};
use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn execute(args: CheckArgs, output: &OutputWriter) -> Result<()> {
    let outer = read_ring(&args.outer)?;
    let inner = read_ring(&args.inner)?;
    let mode = if args.strict { ContainmentMode::Strict } else { ContainmentMode::VertexSampling };

    let result = check(&outer, &inner, mode);
    tracing::debug!(contained = result.contained, mode = ?mode, "Containment checked");

    if output.is_json() {
        return output.result(result);
    }

    output.section("Rings");
    output.kv(
        "Outer",
        format!("{} vertices, {:.2} acres", result.outer.vertices, result.outer.area_acres),
    );
    output.kv(
        "Inner",
        format!("{} vertices, {:.2} acres", result.inner.vertices, result.inner.area_acres),
    );
    for error in result.outer.errors.iter().chain(&result.inner.errors) {
        output.warning(error);
    }

    output.section("Containment");
    output.kv("Mode", format!("{:?}", mode));
    if result.contained {
        output.success("Inner ring is inside the outer ring");
    } else {
        output.warning("Inner ring is NOT inside the outer ring");
    }

    Ok(())
}

/// Containment verdict plus a summary of both rings
pub fn check(outer: &Ring, inner: &Ring, mode: ContainmentMode) -> CheckOutput {
    let estimator = GeodesicAreaEstimator::new();
    let summarize = |ring: &Ring| RingSummary {
        vertices: ring.len(),
        area_acres: estimator.estimate_acres(ring),
        errors: validate_ring(ring)
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.location, e.reason))
            .collect(),
    };

    CheckOutput {
        mode,
        contained: contains_with_mode(outer, inner, mode),
        outer: summarize(outer),
        inner: summarize(inner),
    }
}

/// Read a JSON array of `[lat, lng]` pairs
pub fn read_ring(path: &Path) -> Result<Ring> {
    let display = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| invalid_ring_file(&display, &e.to_string()))?;
    let pairs: Vec<[f64; 2]> =
        serde_json::from_str(&content).map_err(|e| invalid_ring_file(&display, &e.to_string()))?;
    Ok(Ring::from(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ring(pairs: &[[f64; 2]]) -> Ring {
        Ring::from(pairs.to_vec())
    }

    /// Two arms joined along the bottom, open between lng 1 and 2 above lat 1
    fn u_shape() -> Ring {
        ring(&[
            [0.0, 0.0],
            [0.0, 3.0],
            [3.0, 3.0],
            [3.0, 2.0],
            [1.0, 2.0],
            [1.0, 1.0],
            [3.0, 1.0],
            [3.0, 0.0],
        ])
    }

    #[test]
    fn test_square_inside_square() {
        let outer = ring(&[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]);
        let inner = ring(&[[2.0, 2.0], [2.0, 4.0], [4.0, 4.0], [4.0, 2.0]]);

        let result = check(&outer, &inner, ContainmentMode::VertexSampling);
        assert!(result.contained);
        assert_eq!(result.outer.vertices, 4);
        assert!(result.outer.area_acres > result.inner.area_acres);
        assert!(result.inner.errors.is_empty());
    }

    #[test]
    fn test_strict_catches_edge_across_notch() {
        let inner = ring(&[[0.2, 0.2], [0.2, 2.8], [0.8, 2.8]]);
        let inner_bridging = ring(&[[2.5, 0.5], [2.5, 2.5], [2.8, 2.5]]);

        assert!(check(&u_shape(), &inner, ContainmentMode::VertexSampling).contained);
        assert!(check(&u_shape(), &inner, ContainmentMode::Strict).contained);
        assert!(check(&u_shape(), &inner_bridging, ContainmentMode::VertexSampling).contained);
        assert!(!check(&u_shape(), &inner_bridging, ContainmentMode::Strict).contained);
    }

    #[test]
    fn test_degenerate_ring_reports_errors() {
        let outer = ring(&[[0.0, 0.0], [0.0, 1.0]]);
        let inner = ring(&[[0.1, 0.1], [0.1, 0.2], [0.2, 0.2]]);

        let result = check(&outer, &inner, ContainmentMode::VertexSampling);
        assert!(!result.contained);
        assert!(result.outer.errors[0].starts_with("Ring: "));
    }

    #[test]
    fn test_read_ring_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[28.61, 77.20], [28.62, 77.20], [28.62, 77.21]]").unwrap();

        let ring = read_ring(file.path()).unwrap();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.vertices()[0].lat, 28.61);
    }

    #[test]
    fn test_read_ring_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"a ring\"}}").unwrap();

        let err = read_ring(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot read ring file");
    }
}
