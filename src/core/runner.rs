//! Application runner logic
//!
//! Handles the different things a glyphink invocation can do: report
//! status, print a glyph's contours, export a UFO and save the project.

use crate::core::cli::{parse_glyph_arg, CliArgs};
use crate::core::config_file::ConfigFile;
use crate::core::settings::OutlineSettings;
use crate::data::project::{codepoint_label, glyph_name, GlyphStatus, Project};
use crate::data::ufo::export_ufo;
use crate::logging;
use crate::outline::{build_outline, MergeOutcome};
use anyhow::{anyhow, Result};
use std::fmt::Write;
use tracing::{info, warn};

/// Create and run the application with the given CLI arguments.
/// Handles special CLI flags and delegates to the requested actions.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory();
    }

    let config = ConfigFile::load();
    let log_level = config.as_ref().and_then(|c| c.log_level.as_deref());
    let _log_guard = logging::init(log_level, cli_args.log_file)?;

    let settings = cli_args.outline_settings(config.as_ref());
    let mut project = match &cli_args.project {
        Some(path) => Project::load(path)?,
        None => {
            info!("No project given, starting a new one");
            Project::new_default()
        }
    };

    let mut acted = false;

    if cli_args.status {
        print!("{}", status_report(&project, &settings));
        acted = true;
    }

    if let Some(arg) = &cli_args.glyph {
        let codepoint = parse_glyph_arg(arg).map_err(|e| anyhow!(e))?;
        println!("{}", glyph_contours_json(&project, codepoint, &settings)?);
        acted = true;
    }

    if let Some(path) = &cli_args.export_ufo {
        export_ufo(&project, path, &settings, cli_args.force)?;
        println!("Exported UFO to {}", path.display());
        acted = true;
    }

    if let Some(path) = &cli_args.save_project {
        if project.font_name.trim().is_empty() {
            warn!("Project has no font name, using default");
            project.font_name = crate::data::project::DEFAULT_FONT_NAME.to_string();
        }
        project.save(path)?;
        println!("Saved project to {}", path.display());
        acted = true;
    }

    if !acted {
        let missing = project.required_missing(&settings).len();
        println!(
            "Project '{}': {} glyphs, {} required glyph(s) not done",
            project.font_name,
            project.glyph_order.len(),
            missing
        );
        println!("Run with --status, --glyph, --export-ufo or --save-project.");
    }

    Ok(())
}

/// One line per glyph in glyph order, followed by the missing required set
pub fn status_report(project: &Project, settings: &OutlineSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} glyphs)", project.font_name, project.glyph_order.len());

    let mut done = 0;
    for &cp in &project.glyph_order {
        let status = project.status(cp, settings);
        if status == GlyphStatus::Done {
            done += 1;
        }
        let strokes = project.glyph(cp).map_or(0, |g| g.strokes.len());
        let _ = writeln!(
            out,
            "  {:<14} {:<8} {} stroke(s)",
            codepoint_label(cp),
            status.label(),
            strokes
        );
    }

    let missing = project.required_missing(settings);
    let _ = writeln!(out, "{} of {} glyphs done", done, project.glyph_order.len());
    if missing.is_empty() {
        let _ = writeln!(out, "All required glyphs are done");
    } else {
        let labels: Vec<String> = missing.iter().map(|&cp| codepoint_label(cp)).collect();
        let _ = writeln!(out, "Missing required: {}", labels.join(", "));
    }
    out
}

/// Computed contours of one glyph as pretty JSON
pub fn glyph_contours_json(
    project: &Project,
    codepoint: u32,
    settings: &OutlineSettings,
) -> Result<String> {
    let glyph = project
        .glyph(codepoint)
        .ok_or_else(|| anyhow!("{} is not part of this project", codepoint_label(codepoint)))?;

    let report = build_outline(glyph, &project.metrics, settings);
    let merged = !matches!(report.merge, MergeOutcome::Unmerged(_));
    let value = serde_json::json!({
        "codepoint": codepoint,
        "name": glyph_name(codepoint),
        "advanceWidth": glyph.advance_width,
        "merged": merged,
        "contours": report.contours,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
