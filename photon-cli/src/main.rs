//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use photon_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();
    match photon_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("photon: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` and defaulting to warnings.
///
/// `log` records from the library crates are forwarded to the subscriber.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
