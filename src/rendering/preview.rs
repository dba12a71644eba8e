//! Glyph preview support
//!
//! Maps between design units and a pixel canvas, and fills contours into a
//! triangle mesh with lyon. The mesh uses the nonzero rule, the same rule
//! fonts are rendered with, so overlapping unmerged contours still preview
//! as solid ink.

use crate::data::glyph::FontMetrics;
use crate::geometry::Contour;
use anyhow::{anyhow, Result};
use kurbo::Point;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};
use tracing::trace;

/// Flattening tolerance for preview meshes, in design units
pub const DEFAULT_PREVIEW_TOLERANCE: f32 = 0.1;

pub type PreviewMesh = VertexBuffers<[f32; 2], u32>;

/// Design space to canvas pixels for one glyph
///
/// The glyph's advance spans the canvas width. The ascender sits on the top
/// edge and the descender on the bottom edge, with pixel `y` growing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    scale_x: f64,
    scale_y: f64,
    ascender: f64,
}

impl PreviewTransform {
    pub fn new(canvas_width: f64, canvas_height: f64, advance_width: f64, metrics: &FontMetrics) -> Self {
        Self {
            scale_x: canvas_width / advance_width,
            scale_y: canvas_height / metrics.vertical_span(),
            ascender: metrics.ascender,
        }
    }

    pub fn to_pixel(&self, design: Point) -> Point {
        Point::new(design.x * self.scale_x, (self.ascender - design.y) * self.scale_y)
    }

    pub fn to_design(&self, pixel: Point) -> Point {
        Point::new(pixel.x / self.scale_x, self.ascender - pixel.y / self.scale_y)
    }

    /// Contours moved into pixel space
    pub fn contours_to_pixels(&self, contours: &[Contour]) -> Vec<Contour> {
        contours
            .iter()
            .map(|c| Contour::new(c.points.iter().map(|&p| self.to_pixel(p)).collect()))
            .collect()
    }
}

fn contours_to_lyon_path(contours: &[Contour]) -> Path {
    let mut builder = Path::builder();
    for contour in contours.iter().filter(|c| c.len() >= 3) {
        let mut points = contour.points.iter();
        if let Some(first) = points.next() {
            builder.begin(point(first.x as f32, first.y as f32));
            for p in points {
                builder.line_to(point(p.x as f32, p.y as f32));
            }
            builder.end(true);
        }
    }
    builder.build()
}

/// Fill contours into a triangle mesh using the nonzero rule
pub fn tessellate_contours(contours: &[Contour], tolerance: f32) -> Result<PreviewMesh> {
    let path = contours_to_lyon_path(contours);
    let mut mesh: PreviewMesh = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator
        .tessellate_path(
            &path,
            &FillOptions::non_zero().with_tolerance(tolerance),
            &mut BuffersBuilder::new(&mut mesh, |vertex: FillVertex| vertex.position().to_array()),
        )
        .map_err(|e| anyhow!("Failed to tessellate glyph preview: {:?}", e))?;

    trace!(
        "Tessellated {} contour(s) into {} triangles",
        contours.len(),
        mesh.indices.len() / 3
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
        Contour::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    fn mesh_area(mesh: &PreviewMesh) -> f64 {
        mesh.indices
            .chunks(3)
            .map(|tri| {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
                let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
                (cross as f64).abs() / 2.0
            })
            .sum()
    }

    #[test]
    fn transform_maps_metrics_to_canvas_edges() {
        let metrics = FontMetrics::default();
        let t = PreviewTransform::new(300.0, 500.0, 600.0, &metrics);
        assert_eq!(t.to_pixel(Point::new(0.0, 800.0)), Point::new(0.0, 0.0));
        assert_eq!(t.to_pixel(Point::new(600.0, -200.0)), Point::new(300.0, 500.0));

        let back = t.to_design(t.to_pixel(Point::new(123.0, 45.0)));
        assert!((back.x - 123.0).abs() < 1e-9);
        assert!((back.y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn square_fills_with_two_triangles() {
        let mesh = tessellate_contours(&[rect(0.0, 0.0, 10.0, 10.0)], DEFAULT_PREVIEW_TOLERANCE).unwrap();
        assert_eq!(mesh.indices.len(), 6);
        assert!((mesh_area(&mesh) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn overlapping_contours_fill_as_union() {
        let contours = [rect(0.0, 0.0, 10.0, 10.0), rect(5.0, 5.0, 15.0, 15.0)];
        let mesh = tessellate_contours(&contours, DEFAULT_PREVIEW_TOLERANCE).unwrap();
        // Even-odd would leave the 25 unit overlap empty
        assert!((mesh_area(&mesh) - 175.0).abs() < 1e-3);
    }

    #[test]
    fn opposite_winding_cuts_a_hole() {
        let outer = rect(0.0, 0.0, 30.0, 30.0);
        let mut inner = rect(10.0, 10.0, 20.0, 20.0);
        inner.points.reverse();
        let mesh = tessellate_contours(&[outer, inner], DEFAULT_PREVIEW_TOLERANCE).unwrap();
        assert!((mesh_area(&mesh) - 800.0).abs() < 1e-3);
    }

    #[test]
    fn no_contours_give_empty_mesh() {
        let mesh = tessellate_contours(&[], DEFAULT_PREVIEW_TOLERANCE).unwrap();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
