//! Process-level error handling and argument parsing.

use crate::geometry::is_backend_panic_location;

/// Initialize panic handling.
///
/// Panics inside the polygon boolean backend are caught by the outline
/// builder and handled as an unmerged outline. Their reports go to the debug
/// log instead of the terminal; every other panic is reported as usual.
pub fn init_panic_handling() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Some(location) = info.location() {
            if is_backend_panic_location(location.file()) {
                tracing::debug!("Boolean backend panicked at {}: {}", location, info);
                return;
            }
        }
        default_hook(info);
    }));
}

/// Handle application errors: print to stderr and exit with code 1.
pub fn handle_error(error: anyhow::Error) {
    eprintln!();
    eprintln!("glyphink failed:");
    eprintln!("{error:#}");
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse command line arguments, exiting with a message if they are invalid.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    let args = crate::core::cli::CliArgs::parse();
    if let Err(message) = args.validate() {
        eprintln!("{message}");
        std::process::exit(1);
    }
    args
}
