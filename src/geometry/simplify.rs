//! Ring simplification
//!
//! Offsetting, round caps and union multiply vertex counts well beyond what
//! a legible outline needs. Rings are thinned with Ramer-Douglas-Peucker
//! over their closed vertex list.

use super::ring::{unique_count, Ring};
use kurbo::{Line, ParamCurveNearest, Point};

/// Tolerance in design units, tuned for a 1000 unit em
pub const DEFAULT_SIMPLIFY_EPSILON: f64 = 2.0;

/// Rings with fewer vertices than this are left alone
const MIN_SIMPLIFY_LEN: usize = 5;

/// Simplify a closed ring within `epsilon` design units
///
/// The original ring is returned unchanged when it is too small to be worth
/// simplifying, or when simplification would collapse it below three
/// distinct vertices.
pub fn simplify_ring(ring: &Ring, epsilon: f64) -> Ring {
    if ring.len() < MIN_SIMPLIFY_LEN {
        return ring.clone();
    }

    let simplified = rdp(ring.points(), epsilon);
    if unique_count(&simplified) < 3 {
        return ring.clone();
    }

    // Ring::new re-closes if the endpoints were lost
    Ring::new(simplified)
}

/// Ramer-Douglas-Peucker keeping both endpoints
pub fn rdp(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    // Explicit stack instead of recursion: stroke rings can be long
    let mut spans = vec![(0, points.len() - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }
        let mut max_dist = 0.0;
        let mut max_idx = start;
        for i in start + 1..end {
            let dist = perpendicular_distance(points[i], points[start], points[end]);
            if dist > max_dist {
                max_dist = dist;
                max_idx = i;
            }
        }
        if max_dist > epsilon {
            keep[max_idx] = true;
            spans.push((start, max_idx));
            spans.push((max_idx, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(*p))
        .collect()
}

/// Distance from `point` to the segment `start..end`
///
/// A degenerate segment, as at the seam of a closed ring, measures distance
/// to the point itself.
fn perpendicular_distance(point: Point, start: Point, end: Point) -> f64 {
    if (end - start).hypot2() < 1e-20 {
        return point.distance(start);
    }
    let nearest = Line::new(start, end).nearest(point, 1e-9);
    nearest.distance_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wobbly_square() -> Ring {
        // Square with tiny bumps along each edge
        let mut points = Vec::new();
        for i in 0..10 {
            points.push(Point::new(i as f64 * 10.0, if i % 2 == 0 { 0.0 } else { 0.5 }));
        }
        for i in 0..10 {
            points.push(Point::new(100.0, i as f64 * 10.0));
        }
        for i in 0..10 {
            points.push(Point::new(100.0 - i as f64 * 10.0, 100.0));
        }
        for i in 0..10 {
            points.push(Point::new(0.0, 100.0 - i as f64 * 10.0));
        }
        Ring::new(points)
    }

    #[test]
    fn removes_points_within_tolerance() {
        let ring = wobbly_square();
        let simplified = simplify_ring(&ring, DEFAULT_SIMPLIFY_EPSILON);
        assert!(simplified.is_closed());
        assert!(simplified.len() < ring.len());
        assert_eq!(simplified.unique_vertex_count(), 4);
        assert!((simplified.area() - ring.area()).abs() / ring.area() < 0.01);
    }

    #[test]
    fn keeps_features_beyond_tolerance() {
        let ring = wobbly_square();
        let simplified = simplify_ring(&ring, 0.1);
        // Only the collinear runs on the three straight edges go
        assert_eq!(simplified.len(), ring.len() - 27);
    }

    #[test]
    fn small_rings_are_returned_unchanged() {
        let ring = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]);
        assert_eq!(ring.len(), 4);
        assert_eq!(simplify_ring(&ring, 100.0), ring);
    }

    #[test]
    fn never_collapses_below_three_unique_vertices() {
        let ring = wobbly_square();
        let simplified = simplify_ring(&ring, 1.0e6);
        assert!(simplified.unique_vertex_count() >= 3);
        assert_eq!(simplified, ring);

        let sliver = Ring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.1),
            Point::new(30.0, 0.0),
            Point::new(20.0, -0.1),
        ]);
        let simplified = simplify_ring(&sliver, DEFAULT_SIMPLIFY_EPSILON);
        assert!(simplified.unique_vertex_count() >= 3);
    }

    #[test]
    fn rdp_keeps_endpoints() {
        let line = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.1),
            Point::new(10.0, 0.0),
        ];
        assert_eq!(rdp(&line, 1.0), vec![line[0], line[2]]);
        assert_eq!(rdp(&line, 0.01), line);
    }
}
