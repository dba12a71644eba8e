//! Persisted data and export formats
//!
//! Stroke and glyph records, project files, and conversion of computed
//! contours into kurbo paths and UFO sources.

pub mod conversions;
pub mod glyph;
pub mod project;
pub mod ufo;

pub use glyph::{FontMetrics, Glyph, Stroke, StrokePoint};
pub use project::{GlyphStatus, Project, ProjectError};
