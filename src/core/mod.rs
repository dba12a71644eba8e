//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Outline settings and the user config file
//! - CLI parsing and validation
//! - The runner that ties project, outline and export together

pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;
pub mod settings;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use runner::run_app;
pub use settings::OutlineSettings;
