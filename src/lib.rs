//! Glyphink
//!
//! Turns hand-drawn, pressure-sampled strokes into closed glyph outlines:
//! strokes are mapped into design units, offset into brush shaped rings,
//! merged with a boolean union and simplified into font-ready contours.
pub mod core;
pub mod data;
pub mod geometry;
pub mod logging;
pub mod outline;
pub mod rendering;
