//! Command-line interface for geocoding addresses against a Photon instance.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod search;

pub use error::CliError;
use search::{SearchArgs, run_search};

pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_HOST: &str = "host";
pub(crate) const ARG_PORT: &str = "port";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_LAYER: &str = "layer";
pub(crate) const ARG_OSM_TAG: &str = "osm-tag";
pub(crate) const ARG_FAN_OUT: &str = "fan-out";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ENV_QUERY: &str = "PHOTON_CMDS_SEARCH_QUERY";

/// Run the Photon CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, when the
/// client cannot be built, when output cannot be written, or when any query
/// failed.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Search(args) => run_search(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "photon",
    about = "Geocode free-text addresses with a Photon instance",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode one or more queries and print ranked addresses.
    Search(SearchArgs),
}

#[cfg(test)]
mod tests;
