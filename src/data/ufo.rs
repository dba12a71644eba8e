//! UFO export
//!
//! Builds a norad font from a project by running every glyph through the
//! outline pipeline, then writes it to disk as a UFO 3 source.

use crate::core::settings::OutlineSettings;
use crate::data::project::{codepoint_label, glyph_name, Project};
use crate::geometry::Contour;
use crate::outline::{build_outline, MergeOutcome};
use anyhow::{Context, Result};
use kurbo::Point;
use norad::Font;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// `.notdef` box inset as a fraction of the em
const NOTDEF_MARGIN: f64 = 0.06;
/// `.notdef` box side as a fraction of the em
const NOTDEF_SIZE: f64 = 0.70;

pub const STYLE_NAME: &str = "Regular";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(
        "{} required glyph(s) are not done yet: {}",
        .missing.len(),
        describe_missing(.missing)
    )]
    Incomplete { missing: Vec<u32> },
}

fn describe_missing(missing: &[u32]) -> String {
    missing
        .iter()
        .map(|&cp| codepoint_label(cp))
        .collect::<Vec<_>>()
        .join(", ")
}

fn notdef_glyph(units_per_em: f64) -> norad::Glyph {
    let m = units_per_em * NOTDEF_MARGIN;
    let s = units_per_em * NOTDEF_SIZE;
    let square = Contour::new(vec![
        Point::new(m, m),
        Point::new(m + s, m),
        Point::new(m + s, m + s),
        Point::new(m, m + s),
    ]);

    let mut glyph = norad::Glyph::new(".notdef");
    glyph.width = units_per_em;
    glyph.contours.push(square.to_norad_contour());
    glyph
}

fn font_info(project: &Project) -> norad::FontInfo {
    let mut info = norad::FontInfo::default();
    info.family_name = Some(project.font_name.clone());
    info.style_name = Some(STYLE_NAME.to_string());
    if let Some(units_per_em) =
        norad::fontinfo::NonNegativeIntegerOrFloat::new(project.units_per_em)
    {
        info.units_per_em = Some(units_per_em);
    }
    info.ascender = Some(project.metrics.ascender);
    info.descender = Some(project.metrics.descender);
    info.x_height = Some(project.metrics.x_height);
    info.cap_height = Some(project.metrics.cap_height);
    info
}

/// Build an in-memory UFO font with outlines computed from the strokes
pub fn project_to_ufo(project: &Project, settings: &OutlineSettings) -> Font {
    let mut font = Font::new();
    font.font_info = font_info(project);

    let layer = font.default_layer_mut();
    layer.insert_glyph(notdef_glyph(project.units_per_em));

    let mut unmerged = 0;
    for glyph in project.ordered_glyphs() {
        let report = build_outline(glyph, &project.metrics, settings);
        if matches!(report.merge, MergeOutcome::Unmerged(_)) {
            unmerged += 1;
        }

        let mut ufo_glyph = norad::Glyph::new(&glyph_name(glyph.codepoint));
        ufo_glyph.width = glyph.advance_width;
        if let Some(c) = char::from_u32(glyph.codepoint) {
            ufo_glyph.codepoints.insert(c);
        }
        ufo_glyph.contours = report
            .contours
            .iter()
            .filter(|contour| contour.len() >= 3)
            .map(Contour::to_norad_contour)
            .collect();
        layer.insert_glyph(ufo_glyph);
    }

    if unmerged > 0 {
        warn!("{} glyph(s) exported with overlapping stroke outlines", unmerged);
    }
    debug!("Built UFO with {} glyphs", layer.len());
    font
}

/// Write the project as a UFO, refusing incomplete projects unless forced
pub fn export_ufo(
    project: &Project,
    path: &Path,
    settings: &OutlineSettings,
    force: bool,
) -> Result<()> {
    let missing = project.required_missing(settings);
    if !missing.is_empty() {
        if !force {
            return Err(ExportError::Incomplete { missing }.into());
        }
        warn!(
            "Exporting with {} required glyph(s) missing",
            missing.len()
        );
    }

    let font = project_to_ufo(project, settings);
    font.save(path)
        .with_context(|| format!("Failed to write UFO to {}", path.display()))?;
    info!("Exported '{}' to {:?}", project.font_name, path);
    Ok(())
}

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let font = Font::load(path)?;
    Ok(font)
}
