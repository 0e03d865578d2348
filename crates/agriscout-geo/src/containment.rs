//! Point-in-polygon and polygon-in-polygon predicates over rings.
//!
//! Both predicates are planar: latitude and longitude are used directly as
//! Cartesian axes. Results for points lying exactly on an edge or a vertex
//! depend on floating point rounding and are not specified.

use geo::algorithm::contains::Contains;

use crate::models::{to_geo_polygon, Coordinate, Ring};
use crate::spatial::bounds_may_contain;
use agriscout_core::models::ContainmentMode;

/// Ray-casting membership test.
///
/// Walks every edge `(ring[i], ring[j])` with `j = i - 1` (wrapping), and
/// toggles `inside` whenever the edge straddles the point's longitude and
/// the crossing lies on the far latitude side. Rings with fewer than three
/// vertices contain nothing. Malformed rings never error; the answer is
/// best-effort.
pub fn point_in_polygon(point: &Coordinate, ring: &Ring) -> bool {
    let vertices = ring.vertices();
    if vertices.len() < 3 {
        return false;
    }

    let x = point.lat;
    let y = point.lng;
    let mut inside = false;

    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].lat, vertices[i].lng);
        let (xj, yj) = (vertices[j].lat, vertices[j].lng);

        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Vertex-sampling containment: true iff every vertex of `inner` is inside
/// `outer`.
///
/// This is an approximation. An `inner` edge may still leave `outer`
/// between two contained vertices (e.g. across the notch of a concave
/// land). Use [`contains_with_mode`] with [`ContainmentMode::Strict`] for
/// full polygon containment.
pub fn polygon_contains_polygon(outer: &Ring, inner: &Ring) -> bool {
    inner.iter().all(|vertex| point_in_polygon(vertex, outer))
}

/// Containment under the configured mode
pub fn contains_with_mode(outer: &Ring, inner: &Ring, mode: ContainmentMode) -> bool {
    match mode {
        ContainmentMode::VertexSampling => polygon_contains_polygon(outer, inner),
        ContainmentMode::Strict => strict_contains(outer, inner),
    }
}

/// Full polygon containment using `geo`
fn strict_contains(outer: &Ring, inner: &Ring) -> bool {
    if !outer.is_polygon() || !inner.is_polygon() || !bounds_may_contain(outer, inner) {
        return false;
    }
    to_geo_polygon(outer).contains(&to_geo_polygon(inner))
}
