//! Stroke and glyph data as captured by the drawing surface
//!
//! Everything here lives in normalized input space: `x` and `y` run from
//! 0 to 1 across the drawing canvas, with `y` growing downwards. Only the
//! strokes are stored; outlines are always recomputed from them.

use serde::{Deserialize, Serialize};

/// Pressure assumed when the input device did not report one.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// Brush width used when a stored glyph does not carry one.
pub const DEFAULT_BRUSH_WIDTH: f64 = 60.0;

/// A single pointer sample in normalized canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Stylus force in `[0, 1]`
    #[serde(rename = "p", default = "default_pressure")]
    pub pressure: f64,
    /// Capture time in milliseconds
    #[serde(rename = "t", default)]
    pub timestamp: f64,
}

fn default_pressure() -> f64 {
    DEFAULT_PRESSURE
}

impl StrokePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: DEFAULT_PRESSURE,
            timestamp: 0.0,
        }
    }

    pub fn with_pressure(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            pressure,
            ..Self::new(x, y)
        }
    }

    /// Euclidean distance in normalized space
    pub fn distance(&self, other: &StrokePoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One pen-down to pen-up gesture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    #[serde(default)]
    pub points: Vec<StrokePoint>,
}

impl Stroke {
    pub fn new(points: Vec<StrokePoint>) -> Self {
        Self { points }
    }

    /// A stroke needs two samples before it can be committed
    pub fn is_committable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// A drawn glyph: its strokes plus the brush settings they were drawn with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    #[serde(default)]
    pub codepoint: u32,
    #[serde(default)]
    pub advance_width: f64,
    #[serde(default = "default_brush_width")]
    pub brush_width: f64,
    #[serde(default = "default_pressure_enabled")]
    pub pressure_enabled: bool,
    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

fn default_brush_width() -> f64 {
    DEFAULT_BRUSH_WIDTH
}

fn default_pressure_enabled() -> bool {
    true
}

impl Glyph {
    pub fn new(codepoint: u32, advance_width: f64) -> Self {
        Self {
            codepoint,
            advance_width,
            brush_width: DEFAULT_BRUSH_WIDTH,
            pressure_enabled: true,
            strokes: Vec::new(),
        }
    }

    pub fn with_brush(mut self, brush_width: f64, pressure_enabled: bool) -> Self {
        self.brush_width = brush_width;
        self.pressure_enabled = pressure_enabled;
        self
    }

    /// Append a stroke, ignoring gestures too short to commit
    pub fn push_stroke(&mut self, stroke: Stroke) -> bool {
        if !stroke.is_committable() {
            return false;
        }
        self.strokes.push(stroke);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Vertical font metrics in design units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    pub ascender: f64,
    pub descender: f64,
    #[serde(default = "default_cap_height")]
    pub cap_height: f64,
    #[serde(default = "default_x_height")]
    pub x_height: f64,
    #[serde(default = "default_line_gap")]
    pub line_gap: f64,
}

fn default_cap_height() -> f64 {
    700.0
}

fn default_x_height() -> f64 {
    500.0
}

fn default_line_gap() -> f64 {
    200.0
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            ascender: 800.0,
            descender: -200.0,
            cap_height: default_cap_height(),
            x_height: default_x_height(),
            line_gap: default_line_gap(),
        }
    }
}

impl FontMetrics {
    /// Distance from descender to ascender
    pub fn vertical_span(&self) -> f64 {
        self.ascender - self.descender
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_defaults_when_fields_missing() {
        let point: StrokePoint = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
        assert_eq!(point.pressure, DEFAULT_PRESSURE);
        assert_eq!(point.timestamp, 0.0);
    }

    #[test]
    fn glyph_json_uses_camel_case_and_defaults() {
        let json = r#"{
            "codepoint": 65,
            "advanceWidth": 600,
            "strokes": [{"points": [{"x":0.1,"y":0.2,"p":0.9,"t":12}]}]
        }"#;
        let glyph: Glyph = serde_json::from_str(json).unwrap();
        assert_eq!(glyph.codepoint, 65);
        assert_eq!(glyph.brush_width, DEFAULT_BRUSH_WIDTH);
        assert!(glyph.pressure_enabled);
        assert_eq!(glyph.strokes[0].points[0].pressure, 0.9);

        let out = serde_json::to_value(&glyph).unwrap();
        assert!(out.get("advanceWidth").is_some());
        assert!(out.get("pressureEnabled").is_some());
    }

    #[test]
    fn short_strokes_are_not_committed() {
        let mut glyph = Glyph::new(65, 600.0);
        assert!(!glyph.push_stroke(Stroke::new(vec![StrokePoint::new(0.5, 0.5)])));
        assert!(glyph.push_stroke(Stroke::new(vec![
            StrokePoint::new(0.1, 0.1),
            StrokePoint::new(0.2, 0.2),
        ])));
        assert_eq!(glyph.strokes.len(), 1);
    }

    #[test]
    fn default_metrics_span() {
        assert_eq!(FontMetrics::default().vertical_span(), 1000.0);
    }
}
