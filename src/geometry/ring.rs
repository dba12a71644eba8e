//! Closed polygon rings and the polygon shapes built from them
//!
//! All coordinates are font design units, y-up. A [`Ring`] is stored
//! explicitly closed (its last vertex repeats the first); a [`Contour`] is
//! the implicitly closed form handed to consumers.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A closed loop of design-space vertices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    points: Vec<Point>,
}

impl Ring {
    /// Build a ring, appending the first vertex if the loop is not already closed
    pub fn new(mut points: Vec<Point>) -> Self {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if first != last {
                points.push(first);
            }
        }
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Stored vertex count, closing vertex included
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Number of bitwise-distinct vertices
    pub fn unique_vertex_count(&self) -> usize {
        unique_count(&self.points)
    }

    /// Shoelace area; positive when the ring winds counter-clockwise (y-up)
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    pub fn bounding_box(&self) -> Rect {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(Rect::from_points(*first, *first), |rect, p| {
            rect.union_pt(*p)
        })
    }

    pub fn has_finite_coordinates(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Drop the repeated closing vertex
    pub fn to_contour(&self) -> Contour {
        let mut points = self.points.clone();
        if self.is_closed() {
            points.pop();
        }
        Contour { points }
    }
}

pub(crate) fn unique_count(points: &[Point]) -> usize {
    points
        .iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect::<HashSet<_>>()
        .len()
}

/// An outer boundary followed by zero or more holes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn from_ring(ring: Ring) -> Self {
        Self { rings: vec![ring] }
    }

    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }

    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Filled area: outer area minus hole areas
    pub fn area(&self) -> f64 {
        let outer = self.exterior().map(Ring::area).unwrap_or(0.0);
        outer - self.holes().iter().map(Ring::area).sum::<f64>()
    }
}

/// The canonical shape of every union result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    /// Treat each ring as an independent single-ring polygon
    pub fn from_rings(rings: Vec<Ring>) -> Self {
        Self(rings.into_iter().map(Polygon::from_ring).collect())
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every ring in polygon order, outer boundary before its holes
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.0.iter().flat_map(|polygon| polygon.rings.iter())
    }

    pub fn area(&self) -> f64 {
        self.0.iter().map(Polygon::area).sum()
    }
}

/// An implicitly closed outline loop in design units
///
/// This is the only geometry handed to font export and preview. Consumers
/// emit a move-to for the first vertex, line-to for the rest, then close,
/// and fill all contours of a glyph with the nonzero rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn unique_vertex_count(&self) -> usize {
        unique_count(&self.points)
    }

    /// Re-close into a ring for area and winding queries
    pub fn to_ring(&self) -> Ring {
        Ring::new(self.points.clone())
    }

    pub fn signed_area(&self) -> f64 {
        self.to_ring().signed_area()
    }

    pub fn bounding_box(&self) -> Rect {
        self.to_ring().bounding_box()
    }
}
