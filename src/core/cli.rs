//! Command line interface for glyphink
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Many CLI options are documented with
//! examples to help users understand the expected format.

use crate::core::config_file::ConfigFile;
use crate::core::settings::OutlineSettings;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// glyphink CLI arguments
///
/// Examples:
///   glyphink --status                               # Status of a fresh project
///   glyphink --project MyFont-project.json --status # Status of a saved project
///   glyphink --project p.json --glyph A             # Print contours of "A"
///   glyphink --project p.json --glyph U+00C5        # Print contours of "Å"
///   glyphink --project p.json --export-ufo MyFont.ufo
///   glyphink --save-project MyFont-project.json     # Start a new project file
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "glyphink",
    version,
    about = "Turns hand-drawn strokes into glyph outlines",
    long_about = "glyphink converts pressure-sampled pen strokes into closed, merged glyph outlines. It reads and writes project files and exports UFO sources for font compilers."
)]
pub struct CliArgs {
    /// Project file to load
    ///
    /// If not specified, a fresh project with the default character set
    /// is used.
    #[clap(
        long = "project",
        short = 'p',
        help = "Project file to load (JSON)",
        long_help = "Path to a project file saved by glyphink. If not specified, a fresh project with the default character set is created in memory."
    )]
    pub project: Option<PathBuf>,

    /// Print completion status for every glyph
    #[clap(long = "status", short = 's', help = "Print per-glyph completion status")]
    pub status: bool,

    /// Print the contours of one glyph as JSON
    ///
    /// Accepts a single character ("A") or a codepoint ("U+00C5").
    #[clap(
        long = "glyph",
        short = 'g',
        help = "Print a glyph's contours as JSON",
        long_help = "Print the computed contours of one glyph as JSON. Accepts a single character such as A or a codepoint such as U+00C5."
    )]
    pub glyph: Option<String>,

    /// Write the project as a UFO source
    #[clap(
        long = "export-ufo",
        help = "Export the project as a UFO directory",
        long_help = "Export the project as a UFO 3 directory. Export is refused while required glyphs (A-Z, a-z, 0-9, ÅÄÖåäö) are not done, unless --force is given."
    )]
    pub export_ufo: Option<PathBuf>,

    /// Export even when required glyphs are missing
    #[clap(long = "force", help = "Export even if required glyphs are missing")]
    pub force: bool,

    /// Save the project, e.g. to start a new project file
    #[clap(long = "save-project", help = "Write the project to a JSON file")]
    pub save_project: Option<PathBuf>,

    /// Simplification tolerance in design units
    #[clap(
        long = "epsilon",
        help = "Outline simplification tolerance in design units",
        long_help = "Ramer-Douglas-Peucker tolerance applied to every outline, in design units. Overrides the config file. Default: 2.0"
    )]
    pub epsilon: Option<f64>,

    /// Also write logs to ~/.config/glyphink/logs/
    #[clap(long = "log-file", help = "Also write logs to the config logs directory")]
    pub log_file: bool,

    /// Initialize user configuration directory with default settings
    ///
    /// This creates the ~/.config/glyphink directory with:
    /// - settings.json: outline tuning and log level
    /// - logs/: destination for --log-file
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings",
        long_help = "Initialize the ~/.config/glyphink directory with a settings.json file holding the default outline settings, plus a logs directory."
    )]
    pub new_config: bool,
}

/// Parse a glyph argument: a single character or `U+XXXX`
pub fn parse_glyph_arg(arg: &str) -> Result<u32, String> {
    let trimmed = arg.trim();
    let hex = trimmed
        .strip_prefix("U+")
        .or_else(|| trimmed.strip_prefix("u+"));
    if let Some(hex) = hex {
        return u32::from_str_radix(hex, 16)
            .ok()
            .filter(|cp| char::from_u32(*cp).is_some())
            .ok_or_else(|| format!("Invalid codepoint: '{arg}'\nExpected a form like U+0041."));
    }

    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(u32::from(c)),
        _ => Err(format!(
            "Invalid glyph: '{arg}'\nGive a single character or a codepoint like U+0041."
        )),
    }
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and values are usable before the
    /// application starts, providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.project {
            if !path.is_file() {
                return Err(format!(
                    "Project file does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
        }

        if let Some(glyph) = &self.glyph {
            parse_glyph_arg(glyph)?;
        }

        if let Some(path) = &self.export_ufo {
            if path.is_file() {
                return Err(format!(
                    "Export target is a file: {}\nA UFO is written as a directory.",
                    path.display()
                ));
            }
            if path.extension().map_or(true, |ext| ext != "ufo") {
                return Err(format!(
                    "Export target should end in .ufo: {}",
                    path.display()
                ));
            }
        }

        if let Some(epsilon) = self.epsilon {
            if !epsilon.is_finite() || epsilon < 0.0 {
                return Err(format!(
                    "Invalid epsilon: {epsilon}\nThe tolerance must be a non-negative number."
                ));
            }
        }

        if self.force && self.export_ufo.is_none() {
            return Err("--force only applies together with --export-ufo".to_string());
        }

        Ok(())
    }

    /// Get the outline settings from CLI args, config file, or defaults
    ///
    /// Priority order:
    /// 1. CLI argument (--epsilon)
    /// 2. Config file setting (~/.config/glyphink/settings.json)
    /// 3. Built-in defaults
    pub fn outline_settings(&self, config: Option<&ConfigFile>) -> OutlineSettings {
        let mut settings = match config {
            Some(config) => {
                debug!("Using outline settings from config file");
                config.outline_settings()
            }
            None => OutlineSettings::default(),
        };

        if let Some(epsilon) = self.epsilon {
            debug!("Using simplify epsilon from CLI: {}", epsilon);
            settings = settings.with_epsilon(epsilon);
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_arguments() {
        assert_eq!(parse_glyph_arg("A"), Ok(65));
        assert_eq!(parse_glyph_arg("Å"), Ok(0xC5));
        assert_eq!(parse_glyph_arg("U+00C5"), Ok(0xC5));
        assert_eq!(parse_glyph_arg("u+41"), Ok(65));
        assert!(parse_glyph_arg("AB").is_err());
        assert!(parse_glyph_arg("").is_err());
        assert!(parse_glyph_arg("U+D800").is_err());
    }

    #[test]
    fn parses_flags() {
        let args = CliArgs::parse_from([
            "glyphink",
            "--glyph",
            "U+0041",
            "--epsilon",
            "0.5",
            "--status",
        ]);
        assert!(args.status);
        assert_eq!(args.glyph.as_deref(), Some("U+0041"));
        assert!(args.validate().is_ok());
        assert_eq!(args.outline_settings(None).simplify_epsilon, 0.5);
    }

    #[test]
    fn validation_catches_mistakes() {
        let missing = CliArgs {
            project: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        assert!(missing.validate().is_err());

        let negative = CliArgs {
            epsilon: Some(-1.0),
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let stray_force = CliArgs {
            force: true,
            ..Default::default()
        };
        assert!(stray_force.validate().is_err());

        let bad_target = CliArgs {
            export_ufo: Some(PathBuf::from("out.otf")),
            ..Default::default()
        };
        assert!(bad_target.validate().is_err());
    }

    #[test]
    fn cli_epsilon_beats_config_file() {
        let config = ConfigFile {
            outline: Some(OutlineSettings::default().with_epsilon(4.0)),
            log_level: None,
        };
        let from_config = CliArgs::default().outline_settings(Some(&config));
        assert_eq!(from_config.simplify_epsilon, 4.0);

        let overridden = CliArgs {
            epsilon: Some(1.0),
            ..Default::default()
        };
        assert_eq!(overridden.outline_settings(Some(&config)).simplify_epsilon, 1.0);
    }
}
