//! Contour format conversion utilities
//!
//! Conversion between our polygonal contours and the kurbo and norad
//! representations used for preview and UFO export. Contours are straight
//! line loops, so every point converts to an on-curve `Line` point.

use crate::geometry::Contour;
use kurbo::{BezPath, PathEl, Point};
use norad::PointType;

impl Contour {
    /// Closed kurbo path: move to the first vertex, line to the rest, close
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(&first) = points.next() {
            path.move_to(first);
            for &pt in points {
                path.line_to(pt);
            }
            path.close_path();
        }
        path
    }

    /// Rebuild a contour from a path made of straight segments
    ///
    /// Curve elements contribute only their end points.
    pub fn from_bez_path(path: &BezPath) -> Self {
        let points = path
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(p),
                PathEl::ClosePath => None,
            })
            .collect();
        Self::new(points)
    }

    pub fn to_norad_contour(&self) -> norad::Contour {
        let points = self
            .points
            .iter()
            .map(|pt| {
                norad::ContourPoint::new(
                    pt.x,
                    pt.y,
                    PointType::Line,
                    false, // smooth
                    None,  // name
                    None,  // identifier
                )
            })
            .collect();

        norad::Contour::new(points, None)
    }

    /// Read back the on-curve points of a norad contour
    pub fn from_norad_contour(norad_contour: &norad::Contour) -> Self {
        let points = norad_contour
            .points
            .iter()
            .filter(|pt| pt.typ != PointType::OffCurve)
            .map(|pt| Point::new(pt.x, pt.y))
            .collect();
        Self::new(points)
    }
}

/// Convert a glyph's contours into one kurbo path with a subpath per contour
pub fn contours_to_bez_path(contours: &[Contour]) -> BezPath {
    let mut path = BezPath::new();
    for contour in contours.iter().filter(|c| c.len() >= 3) {
        for el in contour.to_bez_path().elements() {
            path.push(*el);
        }
    }
    path
}
