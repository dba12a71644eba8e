//! Boolean union of stroke rings
//!
//! Rings are folded pairwise through `geo`'s polygon boolean ops. The inputs
//! must be simple polygons. A failed step abandons the whole merge and
//! callers fall back to the unmerged stroke rings.

use super::ring::{MultiPolygon, Polygon, Ring};
use geo::orient::{Direction, Orient};
use geo::{BooleanOps, Coord, LineString};
use kurbo::Point;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Why a pairwise union step was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnionFailure {
    #[error("boolean backend panicked: {0}")]
    Panicked(String),
    #[error("union of non-empty operands came back empty")]
    EmptyResult,
    #[error("non-finite coordinates")]
    NonFinite,
}

/// The boolean merge could not be completed
#[derive(Debug, Clone, PartialEq, Error)]
#[error("polygon union unavailable at step {step}: {reason}")]
pub struct UnionUnavailable {
    /// Index of the ring being merged when the fold failed
    pub step: usize,
    pub reason: UnionFailure,
}

impl UnionUnavailable {
    fn at(step: usize, reason: UnionFailure) -> Self {
        Self { step, reason }
    }
}

fn to_geo_polygon(ring: &Ring) -> geo::Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring
        .points()
        .iter()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect();
    geo::Polygon::new(LineString::from(coords), vec![])
}

fn from_line_string(line: &LineString<f64>) -> Ring {
    Ring::new(line.coords().map(|c| Point::new(c.x, c.y)).collect())
}

fn from_geo(multi: &geo::MultiPolygon<f64>) -> MultiPolygon {
    let polygons = multi
        .0
        .iter()
        .map(|polygon| {
            let mut rings = vec![from_line_string(polygon.exterior())];
            rings.extend(polygon.interiors().iter().map(from_line_string));
            Polygon::new(rings)
        })
        .collect();
    MultiPolygon(polygons)
}

fn is_finite(multi: &geo::MultiPolygon<f64>) -> bool {
    multi.0.iter().all(|polygon| {
        std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .flat_map(|line| line.coords())
            .all(|c| c.x.is_finite() && c.y.is_finite())
    })
}

/// Source paths of the crates behind `BooleanOps`
const BACKEND_CRATES: [&str; 4] = ["/geo-", "/i_overlay-", "\\geo-", "\\i_overlay-"];

/// Whether a panic raised at `file` came from the boolean backend
///
/// Such panics are caught and reported as `UnionUnavailable`, so a panic
/// hook can keep them out of the user's terminal.
pub fn is_backend_panic_location(file: &str) -> bool {
    BACKEND_CRATES.iter().any(|prefix| file.contains(prefix))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Union one more polygon into the accumulator
fn union_step(
    acc: &geo::MultiPolygon<f64>,
    next: &geo::MultiPolygon<f64>,
    step: usize,
) -> Result<geo::MultiPolygon<f64>, UnionUnavailable> {
    let merged = panic::catch_unwind(AssertUnwindSafe(|| acc.union(next)))
        .map_err(|payload| UnionUnavailable::at(step, UnionFailure::Panicked(panic_message(&*payload))))?;

    if merged.0.is_empty() {
        return Err(UnionUnavailable::at(step, UnionFailure::EmptyResult));
    }
    if !is_finite(&merged) {
        return Err(UnionUnavailable::at(step, UnionFailure::NonFinite));
    }
    Ok(merged)
}

/// Merge single-ring polygons into a minimal outer/hole set
///
/// Outer boundaries come back counter-clockwise and holes clockwise, so the
/// result renders correctly under a nonzero fill. Result ordering is
/// whatever the boolean backend produces.
pub fn union_rings(rings: &[Ring]) -> Result<MultiPolygon, UnionUnavailable> {
    let Some((first, rest)) = rings.split_first() else {
        return Ok(MultiPolygon::default());
    };
    if !first.has_finite_coordinates() {
        return Err(UnionUnavailable::at(0, UnionFailure::NonFinite));
    }

    let mut acc = geo::MultiPolygon::new(vec![to_geo_polygon(first)]);
    for (i, ring) in rest.iter().enumerate() {
        let step = i + 1;
        if !ring.has_finite_coordinates() {
            return Err(UnionUnavailable::at(step, UnionFailure::NonFinite));
        }
        let next = geo::MultiPolygon::new(vec![to_geo_polygon(ring)]);
        acc = union_step(&acc, &next, step)?;
    }

    Ok(from_geo(&acc.orient(Direction::Default)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring {
        Ring::new(vec![
            Point::new(x0, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
            Point::new(x1, y0),
        ])
    }

    #[test]
    fn empty_input_is_an_empty_union() {
        assert!(union_rings(&[]).unwrap().is_empty());
    }

    #[test]
    fn single_ring_is_oriented_counter_clockwise() {
        let ring = rect(0.0, 0.0, 10.0, 10.0);
        assert!(ring.is_clockwise());
        let merged = union_rings(&[ring]).unwrap();
        assert_eq!(merged.len(), 1);
        let outer = merged.polygons()[0].exterior().unwrap();
        assert!(!outer.is_clockwise());
        assert!((outer.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn overlapping_rings_merge_into_one() {
        let merged = union_rings(&[rect(0.0, 0.0, 10.0, 10.0), rect(5.0, 2.0, 15.0, 12.0)]).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.rings().count(), 1);
        assert!((merged.area() - 160.0).abs() < 1e-3);
    }

    #[test]
    fn disjoint_rings_stay_separate() {
        let merged = union_rings(&[rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 0.0, 30.0, 10.0)]).unwrap();
        assert_eq!(merged.len(), 2);
        assert!((merged.area() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn enclosing_strokes_produce_a_hole() {
        // Four bars around a 10x10 counter, staggered so no edges overlap
        let frame = [
            rect(-1.0, 0.0, 31.0, 10.0),
            rect(20.0, -3.0, 33.0, 31.0),
            rect(-1.0, 20.0, 31.0, 30.0),
            rect(-2.0, -2.0, 10.0, 32.0),
        ];
        let merged = union_rings(&frame).unwrap();
        assert_eq!(merged.len(), 1);
        let polygon = &merged.polygons()[0];
        assert_eq!(polygon.holes().len(), 1);
        assert!(!polygon.exterior().unwrap().is_clockwise());
        assert!(polygon.holes()[0].is_clockwise());
        assert!((polygon.holes()[0].area() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn non_finite_rings_make_the_union_unavailable() {
        let bad = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 1.0),
            Point::new(1.0, 1.0),
        ]);
        let err = union_rings(&[rect(0.0, 0.0, 1.0, 1.0), bad]).unwrap_err();
        assert_eq!(err.step, 1);
        assert_eq!(err.reason, UnionFailure::NonFinite);
    }

    #[test]
    fn identical_rings_merge_into_one() {
        let square = rect(0.0, 0.0, 10.0, 10.0);
        let merged = union_rings(&[square.clone(), square]).unwrap();
        assert_eq!(merged.len(), 1);
        assert!((merged.area() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn backend_panic_locations() {
        assert!(is_backend_panic_location(
            "/home/me/.cargo/registry/src/index.crates.io-6f17d22bba15001f/geo-0.29.3/src/algorithm/bool_ops/mod.rs"
        ));
        assert!(is_backend_panic_location(
            "/home/me/.cargo/registry/src/index.crates.io-6f17d22bba15001f/i_overlay-1.9.0/src/core/overlay.rs"
        ));
        assert!(!is_backend_panic_location("src/geometry/union.rs"));
    }
}
