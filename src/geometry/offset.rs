//! Variable-width stroke outlining
//!
//! A centerline is offset to a left and a right rail by the per-point half
//! width, and the two rails are joined by semicircular caps. The rails use
//! the forward segment's normal at every vertex, with no join averaging or
//! mitering, so sharp turns come out faceted.
//!
//! A whole-stroke ring crosses itself on the inside of sharp turns. For the
//! boolean union a stroke is instead cut into one capsule per segment; each
//! capsule is a simple polygon and neighbouring capsules meet in a round join.

use super::mapping::MappedPoint;
use super::ring::Ring;
use kurbo::{Point, Vec2};
use std::f64::consts::PI;

/// Arc segments per round cap
pub const DEFAULT_CAP_SEGMENTS: usize = 8;

/// Lower pressure bound so a light touch still leaves a visible mark
pub const MIN_PRESSURE: f64 = 0.05;

/// Brush parameters for one stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    /// Full stroke width in design units at pressure 1
    pub width: f64,
    pub pressure_enabled: bool,
    pub cap_segments: usize,
}

impl Brush {
    pub fn new(width: f64, pressure_enabled: bool) -> Self {
        Self {
            width,
            pressure_enabled,
            cap_segments: DEFAULT_CAP_SEGMENTS,
        }
    }

    pub fn with_cap_segments(mut self, cap_segments: usize) -> Self {
        self.cap_segments = cap_segments;
        self
    }

    /// Half width at a sample with the given pressure
    pub fn half_width(&self, pressure: f64) -> f64 {
        let factor = if self.pressure_enabled {
            pressure.clamp(MIN_PRESSURE, 1.0)
        } else {
            1.0
        };
        self.width * 0.5 * factor
    }
}

/// Unit left normal of the segment `a -> b` (y-up)
///
/// Coincident points yield a zero vector rather than NaN.
fn left_normal(a: Point, b: Point) -> Vec2 {
    let d = b - a;
    let len = d.hypot();
    let len = if len > 0.0 { len } else { 1.0 };
    Vec2::new(-d.y / len, d.x / len)
}

/// Points strictly inside a circular arc
///
/// The endpoints are left out; they coincide with the rail ends.
fn arc_points(center: Point, radius: f64, start_angle: f64, sweep: f64, steps: usize) -> Vec<Point> {
    let n = steps.max(2);
    (1..n)
        .map(|i| {
            let angle = start_angle + sweep * (i as f64 / n as f64);
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Outline a pressure-weighted polyline as one closed ring
///
/// Returns `None` for fewer than two points. The ring runs along the left
/// rail, around the end cap, back along the right rail and around the start
/// cap, which makes it wind clockwise.
pub fn offset_stroke(points: &[MappedPoint], brush: &Brush) -> Option<Ring> {
    if points.len() < 2 {
        return None;
    }

    let last = points.len() - 1;
    let mut left = Vec::with_capacity(points.len());
    let mut right = Vec::with_capacity(points.len());

    for (i, sample) in points.iter().enumerate() {
        // The final vertex reuses the last segment's normal
        let segment = i.min(last - 1);
        let normal = left_normal(points[segment].position, points[segment + 1].position);
        let offset = normal * brush.half_width(sample.pressure);
        left.push(sample.position + offset);
        right.push(sample.position - offset);
    }

    let first = points[0];
    let end = points[last];
    let start_normal = left_normal(points[0].position, points[1].position);
    let end_normal = left_normal(points[last - 1].position, end.position);

    // Both caps sweep clockwise: the start cap from the right rail around
    // the back of the stroke to the left rail, the end cap from the left
    // rail around the front to the right rail.
    let start_cap = arc_points(
        first.position,
        brush.half_width(first.pressure),
        (-start_normal).atan2(),
        -PI,
        brush.cap_segments,
    );
    let end_cap = arc_points(
        end.position,
        brush.half_width(end.pressure),
        end_normal.atan2(),
        -PI,
        brush.cap_segments,
    );

    let mut ring = Vec::with_capacity(left.len() + right.len() + start_cap.len() + end_cap.len() + 1);
    ring.extend(left);
    ring.extend(end_cap);
    ring.extend(right.into_iter().rev());
    ring.extend(start_cap);

    Some(Ring::new(ring))
}

/// One capsule ring per segment of non-zero length
///
/// Every capsule is a simple polygon, so the pieces can go straight into a
/// boolean union. Their union covers the same ink as `offset_stroke` with
/// round joins at the interior vertices.
pub fn stroke_pieces(points: &[MappedPoint], brush: &Brush) -> Vec<Ring> {
    points
        .windows(2)
        .filter(|pair| pair[0].position != pair[1].position)
        .filter_map(|pair| offset_stroke(pair, brush))
        .collect()
}
