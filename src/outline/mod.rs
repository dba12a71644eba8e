//! Glyph outline building
//!
//! Runs the full stroke-to-contour pipeline for one glyph:
//!
//! 1. map every stroke into design space, dropping accidental taps
//! 2. offset each stroke into a closed ring
//! 3. union the per-segment capsules of every stroke, or keep the stroke
//!    rings unmerged if the union fails
//! 4. simplify every ring and emit the survivors as contours
//!
//! Nothing is cached; every call recomputes from the glyph it is given.

pub mod ink;

use crate::core::settings::OutlineSettings;
use crate::data::glyph::{FontMetrics, Glyph};
use crate::geometry::{
    map_stroke, offset_stroke, polyline_length, simplify_ring, stroke_pieces, union_rings, Brush,
    Contour, MappedPoint, MultiPolygon, Ring, UnionUnavailable,
};
use tracing::{debug, trace, warn};

pub use ink::glyph_ink_estimate;

/// Rings with fewer stored vertices (closing vertex included) are dropped
const MIN_RING_LEN: usize = 4;

/// How the stroke rings were combined
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// No stroke survived filtering
    NoInk,
    /// The boolean union succeeded
    Merged,
    /// The union failed and each stroke ring became its own contour
    Unmerged(UnionUnavailable),
}

/// Contours plus what happened on the way to them
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineReport {
    pub contours: Vec<Contour>,
    pub merge: MergeOutcome,
}

/// Build the contours of a glyph with default settings
pub fn glyph_to_contours(glyph: &Glyph, metrics: &FontMetrics) -> Vec<Contour> {
    glyph_to_contours_with(glyph, metrics, &OutlineSettings::default())
}

pub fn glyph_to_contours_with(
    glyph: &Glyph,
    metrics: &FontMetrics,
    settings: &OutlineSettings,
) -> Vec<Contour> {
    build_outline(glyph, metrics, settings).contours
}

/// Brush for a glyph, falling back to the default width for unusable values
pub fn glyph_brush(glyph: &Glyph, settings: &OutlineSettings) -> Brush {
    let width = if glyph.brush_width.is_finite() && glyph.brush_width > 0.0 {
        glyph.brush_width
    } else {
        settings.default_brush_width
    };
    Brush::new(width, glyph.pressure_enabled).with_cap_segments(settings.cap_segments)
}

/// Strokes mapped into design space, skipping taps and unusable input
fn mapped_strokes(glyph: &Glyph, metrics: &FontMetrics, settings: &OutlineSettings) -> Vec<Vec<MappedPoint>> {
    let mut strokes = Vec::with_capacity(glyph.strokes.len());

    for (index, stroke) in glyph.strokes.iter().enumerate() {
        let mapped = map_stroke(&stroke.points, glyph.advance_width, metrics);
        if mapped.len() < 2 {
            trace!("Skipping stroke {}: {} point(s)", index, mapped.len());
            continue;
        }
        if !mapped.iter().all(MappedPoint::is_finite) {
            trace!("Skipping stroke {}: non-finite samples", index);
            continue;
        }
        let length = polyline_length(&mapped);
        if length < settings.min_stroke_length {
            trace!("Skipping stroke {}: length {:.2} below minimum", index, length);
            continue;
        }
        strokes.push(mapped);
    }

    strokes
}

/// One offset ring per retained stroke, in stroke order
pub fn stroke_rings(glyph: &Glyph, metrics: &FontMetrics, settings: &OutlineSettings) -> Vec<Ring> {
    let brush = glyph_brush(glyph, settings);
    mapped_strokes(glyph, metrics, settings)
        .iter()
        .filter_map(|mapped| offset_stroke(mapped, &brush))
        .collect()
}

/// Simplify every ring of every polygon and emit the usable ones
///
/// Polygon order and outer-before-holes order are preserved.
pub fn rings_to_contours(shapes: &MultiPolygon, epsilon: f64) -> Vec<Contour> {
    shapes
        .rings()
        .filter(|ring| ring.len() >= MIN_RING_LEN)
        .map(|ring| simplify_ring(ring, epsilon))
        .filter(|ring| ring.len() >= MIN_RING_LEN)
        .map(|ring| ring.to_contour())
        .collect()
}

/// Run the whole pipeline and report whether the union was used
pub fn build_outline(glyph: &Glyph, metrics: &FontMetrics, settings: &OutlineSettings) -> OutlineReport {
    build_outline_using(glyph, metrics, settings, union_rings)
}

/// Run the pipeline with a custom merge step
///
/// `merge_rings` receives simple capsule rings, one per stroke segment, and must
/// return their union. On error the whole stroke rings are kept unmerged.
pub fn build_outline_using<F>(
    glyph: &Glyph,
    metrics: &FontMetrics,
    settings: &OutlineSettings,
    merge_rings: F,
) -> OutlineReport
where
    F: FnOnce(&[Ring]) -> Result<MultiPolygon, UnionUnavailable>,
{
    let no_ink = || OutlineReport {
        contours: Vec::new(),
        merge: MergeOutcome::NoInk,
    };
    if glyph.strokes.is_empty() {
        return no_ink();
    }

    let strokes = mapped_strokes(glyph, metrics, settings);
    if strokes.is_empty() {
        debug!("Glyph U+{:04X}: no strokes long enough to outline", glyph.codepoint);
        return no_ink();
    }

    let brush = glyph_brush(glyph, settings);
    let pieces: Vec<Ring> = strokes
        .iter()
        .flat_map(|mapped| stroke_pieces(mapped, &brush))
        .collect();

    let (shapes, merge) = match merge_rings(&pieces) {
        Ok(merged) => (merged, MergeOutcome::Merged),
        Err(err) => {
            let rings: Vec<Ring> = strokes
                .iter()
                .filter_map(|mapped| offset_stroke(mapped, &brush))
                .collect();
            warn!(
                "Glyph U+{:04X}: {}; keeping {} stroke outlines unmerged",
                glyph.codepoint,
                err,
                rings.len()
            );
            (MultiPolygon::from_rings(rings), MergeOutcome::Unmerged(err))
        }
    };

    let contours = rings_to_contours(&shapes, settings.simplify_epsilon);
    debug!(
        "Glyph U+{:04X}: {} stroke(s), {} piece(s) -> {} contour(s)",
        glyph.codepoint,
        strokes.len(),
        pieces.len(),
        contours.len()
    );

    OutlineReport { contours, merge }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::glyph::{Stroke, StrokePoint};
    use crate::geometry::UnionFailure;
    use kurbo::Point;

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke::new(
            points
                .iter()
                .map(|&(x, y)| StrokePoint::with_pressure(x, y, 1.0))
                .collect(),
        )
    }

    #[test]
    fn empty_glyph_has_no_contours() {
        let glyph = Glyph::new(65, 600.0);
        let report = build_outline(&glyph, &FontMetrics::default(), &OutlineSettings::default());
        assert!(report.contours.is_empty());
        assert_eq!(report.merge, MergeOutcome::NoInk);
    }

    #[test]
    fn taps_are_ignored() {
        let mut glyph = Glyph::new(65, 600.0);
        // 0.001 of a 600 unit advance is 0.6 units
        glyph.strokes.push(stroke(&[(0.5, 0.5), (0.501, 0.5)]));
        glyph.strokes.push(Stroke::new(vec![StrokePoint::new(0.2, 0.2)]));
        let report = build_outline(&glyph, &FontMetrics::default(), &OutlineSettings::default());
        assert!(report.contours.is_empty());
        assert_eq!(report.merge, MergeOutcome::NoInk);
    }

    #[test]
    fn unusable_brush_width_falls_back_to_default() {
        let mut glyph = Glyph::new(65, 600.0).with_brush(0.0, false);
        let settings = OutlineSettings::default();
        assert_eq!(glyph_brush(&glyph, &settings).width, settings.default_brush_width);
        glyph.brush_width = 24.0;
        assert_eq!(glyph_brush(&glyph, &settings).width, 24.0);
    }

    #[test]
    fn unmerged_contours_follow_stroke_order() {
        let mut glyph = Glyph::new(65, 600.0).with_brush(40.0, false);
        glyph.strokes.push(stroke(&[(0.1, 0.1), (0.9, 0.1)]));
        glyph.strokes.push(stroke(&[(0.1, 0.9), (0.9, 0.9)]));
        let settings = OutlineSettings::default();

        let rings = stroke_rings(&glyph, &FontMetrics::default(), &settings);
        assert_eq!(rings.len(), 2);
        let contours = rings_to_contours(&MultiPolygon::from_rings(rings), settings.simplify_epsilon);
        assert_eq!(contours.len(), 2);
        // Stroke one is near the ascender, stroke two near the descender
        assert!(contours[0].bounding_box().center().y > contours[1].bounding_box().center().y);
    }

    #[test]
    fn degenerate_rings_are_dropped() {
        let tiny = Ring::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert_eq!(tiny.len(), 3);
        let shapes = MultiPolygon::from_rings(vec![tiny]);
        assert!(rings_to_contours(&shapes, 2.0).is_empty());
    }

    #[test]
    fn non_finite_strokes_are_ignored() {
        let mut glyph = Glyph::new(65, 600.0);
        glyph.strokes.push(stroke(&[(f64::NAN, 0.5), (0.9, 0.5)]));
        let report = build_outline(&glyph, &FontMetrics::default(), &OutlineSettings::default());
        assert!(report.contours.is_empty());
        assert_eq!(report.merge, MergeOutcome::NoInk);

        glyph.strokes.push(stroke(&[(0.1, 0.5), (0.9, 0.5)]));
        let report = build_outline(&glyph, &FontMetrics::default(), &OutlineSettings::default());
        assert_eq!(report.merge, MergeOutcome::Merged);
        assert_eq!(report.contours.len(), 1);
        assert!(report.contours[0]
            .points
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn failed_union_keeps_stroke_rings_in_order() {
        let mut glyph = Glyph::new(65, 600.0).with_brush(40.0, false);
        glyph.strokes.push(stroke(&[(0.1, 0.1), (0.5, 0.3), (0.9, 0.1)]));
        glyph.strokes.push(stroke(&[(0.1, 0.9), (0.9, 0.9)]));
        let failure = UnionUnavailable {
            step: 1,
            reason: UnionFailure::Panicked("sweep failed".to_string()),
        };

        let mut seen = 0;
        let report = build_outline_using(&glyph, &FontMetrics::default(), &OutlineSettings::default(), |pieces| {
            seen = pieces.len();
            Err(failure.clone())
        });

        // Two segment capsules for the bent stroke, one for the straight one
        assert_eq!(seen, 3);
        assert_eq!(report.merge, MergeOutcome::Unmerged(failure));
        assert_eq!(report.contours.len(), 2);
        assert!(report.contours[0].bounding_box().center().y > report.contours[1].bounding_box().center().y);
        // Unmerged stroke rings keep their clockwise winding
        assert!(report.contours.iter().all(|c| c.signed_area() < 0.0));
    }
}
