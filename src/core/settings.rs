//! Outline pipeline settings
//!
//! Built-in defaults are tuned for a 1000 unit em. The user config file and
//! CLI flags can override individual values.

use crate::data::glyph::DEFAULT_BRUSH_WIDTH;
use crate::geometry::{DEFAULT_CAP_SEGMENTS, DEFAULT_SIMPLIFY_EPSILON};
use serde::{Deserialize, Serialize};

/// Strokes shorter than this (design units) are treated as accidental taps
pub const DEFAULT_MIN_STROKE_LENGTH: f64 = 2.0;

/// Normalized ink length below which a glyph only counts as started
pub const DEFAULT_INK_DONE_THRESHOLD: f64 = 0.03;

/// Tuning knobs for turning strokes into contours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineSettings {
    /// Arc segments per round stroke cap
    pub cap_segments: usize,
    /// Simplification tolerance in design units
    pub simplify_epsilon: f64,
    /// Minimum mapped stroke length in design units
    pub min_stroke_length: f64,
    /// Brush width for glyphs created without one
    pub default_brush_width: f64,
    /// Ink estimate a glyph needs before it counts as done
    pub ink_done_threshold: f64,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            cap_segments: DEFAULT_CAP_SEGMENTS,
            simplify_epsilon: DEFAULT_SIMPLIFY_EPSILON,
            min_stroke_length: DEFAULT_MIN_STROKE_LENGTH,
            default_brush_width: DEFAULT_BRUSH_WIDTH,
            ink_done_threshold: DEFAULT_INK_DONE_THRESHOLD,
        }
    }
}

impl OutlineSettings {
    pub fn with_epsilon(mut self, simplify_epsilon: f64) -> Self {
        self.simplify_epsilon = simplify_epsilon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: OutlineSettings = serde_json::from_str(r#"{"simplify_epsilon": 0.5}"#).unwrap();
        assert_eq!(settings.simplify_epsilon, 0.5);
        assert_eq!(settings.cap_segments, DEFAULT_CAP_SEGMENTS);
        assert_eq!(settings.min_stroke_length, DEFAULT_MIN_STROKE_LENGTH);
    }
}
