//! Ink estimate
//!
//! Total drawn length in normalized canvas units. It is a magnitude signal
//! only; what counts as "enough ink" is decided by the caller.

use crate::data::glyph::Glyph;

pub fn glyph_ink_estimate(glyph: &Glyph) -> f64 {
    glyph
        .strokes
        .iter()
        .flat_map(|stroke| stroke.points.windows(2))
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::glyph::{Stroke, StrokePoint};

    #[test]
    fn empty_glyph_has_no_ink() {
        assert_eq!(glyph_ink_estimate(&Glyph::new(65, 600.0)), 0.0);
    }

    #[test]
    fn sums_segments_in_normalized_space() {
        let mut glyph = Glyph::new(65, 600.0);
        glyph.strokes.push(Stroke::new(vec![
            StrokePoint::new(0.0, 0.0),
            StrokePoint::new(0.3, 0.4),
            StrokePoint::new(0.3, 0.9),
        ]));
        glyph.strokes.push(Stroke::new(vec![StrokePoint::new(0.5, 0.5)]));
        let ink = glyph_ink_estimate(&glyph);
        assert!((ink - 1.0).abs() < 1e-12);
    }

    #[test]
    fn advance_width_does_not_scale_ink() {
        let stroke = Stroke::new(vec![StrokePoint::new(0.1, 0.5), StrokePoint::new(0.2, 0.5)]);
        let mut narrow = Glyph::new(65, 300.0);
        narrow.strokes.push(stroke.clone());
        let mut wide = Glyph::new(65, 900.0);
        wide.strokes.push(stroke);
        assert_eq!(glyph_ink_estimate(&narrow), glyph_ink_estimate(&wide));
    }
}
