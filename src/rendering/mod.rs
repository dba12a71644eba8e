//! Rendering and Visualization
//!
//! Preview helpers for drawn glyphs: design-to-pixel mapping and nonzero
//! fill tessellation of computed contours.

pub mod preview;

// Re-export commonly used items
pub use preview::{tessellate_contours, PreviewMesh, PreviewTransform, DEFAULT_PREVIEW_TOLERANCE};
