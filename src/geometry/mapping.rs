//! Normalized canvas space to font design space
//!
//! Captured points are top-down in `[0, 1]`; design space is baseline
//! relative and y-up, spanning the advance width horizontally and the
//! descender..ascender range vertically.

use crate::data::glyph::{FontMetrics, StrokePoint};
use kurbo::Point;

/// A stroke sample mapped into design units, pressure carried along
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPoint {
    pub position: Point,
    pub pressure: f64,
}

impl MappedPoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            position: Point::new(x, y),
            pressure,
        }
    }

    /// False when mapping produced a NaN or infinite value
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.pressure.is_finite()
    }
}

/// Map one normalized sample into design space
pub fn to_design_space(point: &StrokePoint, advance_width: f64, metrics: &FontMetrics) -> MappedPoint {
    let x = point.x.clamp(0.0, 1.0) * advance_width;
    let y = metrics.ascender - point.y.clamp(0.0, 1.0) * metrics.vertical_span();
    MappedPoint::new(x, y, point.pressure.clamp(0.0, 1.0))
}

pub fn map_stroke(points: &[StrokePoint], advance_width: f64, metrics: &FontMetrics) -> Vec<MappedPoint> {
    points
        .iter()
        .map(|p| to_design_space(p, advance_width, metrics))
        .collect()
}

/// Total length of a mapped polyline in design units
pub fn polyline_length(points: &[MappedPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].position.distance(pair[1].position))
        .sum()
}
