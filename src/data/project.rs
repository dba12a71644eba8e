//! Project files
//!
//! A project is the persisted unit: font name, metrics, glyph order and the
//! strokes of every glyph. Outlines are never stored; they are rebuilt from
//! strokes whenever they are needed.

use crate::core::settings::OutlineSettings;
use crate::data::glyph::{FontMetrics, Glyph, DEFAULT_BRUSH_WIDTH};
use crate::outline::glyph_ink_estimate;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub const PROJECT_VERSION: u64 = 1;
pub const DEFAULT_FONT_NAME: &str = "MyFont";
pub const DEFAULT_UNITS_PER_EM: f64 = 1000.0;

/// Characters outside A-Z, a-z and 0-9 that a finished font must contain
const REQUIRED_EXTRA: [char; 6] = ['Å', 'Ä', 'Ö', 'å', 'ä', 'ö'];

/// Characters offered by default but not required for export
const OPTIONAL_CHARS: [char; 8] = [' ', '.', ',', '!', '?', '-', '(', ')'];

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Unsupported project version {found:?} (expected 1)")]
    UnsupportedVersion { found: Option<u64> },
    #[error("Invalid project shape: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// Completion state of a single glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphStatus {
    /// Nothing drawn yet
    Empty,
    /// Some ink, but too little to count as a real drawing
    Partial,
    Done,
}

impl GlyphStatus {
    pub fn of(glyph: &Glyph, ink_done_threshold: f64) -> Self {
        if glyph.strokes.is_empty() {
            GlyphStatus::Empty
        } else if glyph_ink_estimate(glyph) < ink_done_threshold {
            GlyphStatus::Partial
        } else {
            GlyphStatus::Done
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GlyphStatus::Empty => "empty",
            GlyphStatus::Partial => "partial",
            GlyphStatus::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub version: u64,
    pub project_id: String,
    pub font_name: String,
    pub units_per_em: f64,
    pub metrics: FontMetrics,
    pub glyph_order: Vec<u32>,
    pub glyphs: BTreeMap<String, Glyph>,
}

/// Loosely typed project as read from disk, before defaults are applied
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProject {
    project_id: Option<String>,
    font_name: Option<String>,
    units_per_em: Option<f64>,
    metrics: FontMetrics,
    glyph_order: Vec<u32>,
    glyphs: BTreeMap<String, Glyph>,
}

/// Advance width a glyph starts out with
pub fn default_advance_width_for(codepoint: u32) -> f64 {
    match char::from_u32(codepoint) {
        Some(' ' | '.' | ',') => 300.0,
        Some('!' | '?' | '-' | '(' | ')') => 350.0,
        _ => 600.0,
    }
}

/// Whether a finished font must contain this codepoint
pub fn is_required_codepoint(codepoint: u32) -> bool {
    match char::from_u32(codepoint) {
        Some(c) => c.is_ascii_alphanumeric() || REQUIRED_EXTRA.contains(&c),
        None => false,
    }
}

/// Glyph name used when exporting
pub fn glyph_name(codepoint: u32) -> String {
    match char::from_u32(codepoint) {
        Some(' ') => "space".to_string(),
        Some(c) if c.is_ascii_graphic() => c.to_string(),
        _ => format!("uni{:04X}", codepoint),
    }
}

fn new_project_id() -> String {
    format!("{:012x}", rand::random::<u64>() & 0xffff_ffff_ffff)
}

fn blank_glyph(codepoint: u32) -> Glyph {
    Glyph::new(codepoint, default_advance_width_for(codepoint))
}

impl Project {
    /// A fresh project with every default character present and empty
    pub fn new_default() -> Self {
        let mut order: Vec<u32> = ('A'..='Z')
            .chain('a'..='z')
            .chain('0'..='9')
            .chain(REQUIRED_EXTRA)
            .chain(OPTIONAL_CHARS)
            .map(u32::from)
            .collect();
        order.sort_unstable();
        order.dedup();

        let glyphs = order
            .iter()
            .map(|&cp| (cp.to_string(), blank_glyph(cp)))
            .collect();

        Self {
            version: PROJECT_VERSION,
            project_id: new_project_id(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            units_per_em: DEFAULT_UNITS_PER_EM,
            metrics: FontMetrics::default(),
            glyph_order: order,
            glyphs,
        }
    }

    /// Parse and normalize a stored project
    pub fn from_json_str(text: &str) -> Result<Self, ProjectError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(ProjectError::InvalidJson)?;
        let found = value.get("version").and_then(serde_json::Value::as_u64);
        if found != Some(PROJECT_VERSION) {
            return Err(ProjectError::UnsupportedVersion { found });
        }
        let stored: StoredProject = serde_json::from_value(value).map_err(ProjectError::InvalidShape)?;
        Ok(Self::from_stored(stored))
    }

    fn from_stored(mut stored: StoredProject) -> Self {
        let mut glyphs = BTreeMap::new();
        for &cp in &stored.glyph_order {
            let mut glyph = stored
                .glyphs
                .remove(&cp.to_string())
                .unwrap_or_else(|| blank_glyph(cp));
            glyph.codepoint = cp;
            if !glyph.advance_width.is_finite() || glyph.advance_width <= 0.0 {
                glyph.advance_width = default_advance_width_for(cp);
            }
            if !glyph.brush_width.is_finite() || glyph.brush_width <= 0.0 {
                glyph.brush_width = DEFAULT_BRUSH_WIDTH;
            }
            glyphs.insert(cp.to_string(), glyph);
        }

        let font_name = stored
            .font_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FONT_NAME.to_string());

        Self {
            version: PROJECT_VERSION,
            project_id: stored
                .project_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(new_project_id),
            font_name,
            units_per_em: stored
                .units_per_em
                .filter(|upm| *upm > 0.0)
                .unwrap_or(DEFAULT_UNITS_PER_EM),
            metrics: stored.metrics,
            glyph_order: stored.glyph_order,
            glyphs,
        }
    }

    pub fn to_json_string(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?;
        let project = Self::from_json_str(&text)
            .with_context(|| format!("Failed to import project {}", path.display()))?;
        info!(
            "Loaded project '{}' with {} glyphs from {:?}",
            project.font_name,
            project.glyph_order.len(),
            path
        );
        Ok(project)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_string()?)
            .with_context(|| format!("Failed to write project file {}", path.display()))?;
        debug!("Saved project to {:?}", path);
        Ok(())
    }

    /// File name the project is exported under by default
    pub fn default_file_name(&self) -> String {
        format!("{}-project.json", self.font_name)
    }

    pub fn glyph(&self, codepoint: u32) -> Option<&Glyph> {
        self.glyphs.get(&codepoint.to_string())
    }

    pub fn glyph_mut(&mut self, codepoint: u32) -> Option<&mut Glyph> {
        self.glyphs.get_mut(&codepoint.to_string())
    }

    /// Glyphs in glyph order, skipping order entries without a glyph
    pub fn ordered_glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyph_order.iter().filter_map(|&cp| self.glyph(cp))
    }

    pub fn status(&self, codepoint: u32, settings: &OutlineSettings) -> GlyphStatus {
        self.glyph(codepoint)
            .map(|glyph| GlyphStatus::of(glyph, settings.ink_done_threshold))
            .unwrap_or(GlyphStatus::Empty)
    }

    /// Required codepoints in glyph order that are not done yet
    pub fn required_missing(&self, settings: &OutlineSettings) -> Vec<u32> {
        self.glyph_order
            .iter()
            .copied()
            .filter(|&cp| is_required_codepoint(cp))
            .filter(|&cp| self.status(cp, settings) != GlyphStatus::Done)
            .collect()
    }
}

/// Human-readable label for a codepoint, e.g. `A (U+0041)`
pub fn codepoint_label(codepoint: u32) -> String {
    let shown = match char::from_u32(codepoint) {
        Some(' ') => '␠',
        Some(c) => c,
        None => '?',
    };
    format!("{} (U+{:04X})", shown, codepoint)
}
