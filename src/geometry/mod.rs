//! Geometric Primitives and Operations
//!
//! The stroke-to-outline engine: mapping into design space, offsetting
//! strokes into rings, merging rings and simplifying them.

pub mod mapping;
pub mod offset;
pub mod ring;
pub mod simplify;
pub mod union;

// Re-export commonly used items
pub use mapping::{map_stroke, polyline_length, to_design_space, MappedPoint};
pub use offset::{offset_stroke, stroke_pieces, Brush, DEFAULT_CAP_SEGMENTS, MIN_PRESSURE};
pub use ring::{Contour, MultiPolygon, Polygon, Ring};
pub use simplify::{simplify_ring, DEFAULT_SIMPLIFY_EPSILON};
pub use union::{is_backend_panic_location, union_rings, UnionFailure, UnionUnavailable};
