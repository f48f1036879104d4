//! Error types emitted by the Photon CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use photon_core::TagFilterError;
use photon_data::ClientBuildError;
use thiserror::Error;

/// Errors emitted by the Photon CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it positionally or set {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The result limit was zero.
    #[error("--{field} must be greater than zero")]
    ZeroLimit {
        /// Name of the offending option.
        field: &'static str,
    },
    /// A `--layer` value is not a known layer.
    #[error(
        "unknown layer {value:?} (expected house, street, locality, district, city, county, \
         state or country)"
    )]
    InvalidLayer {
        /// The rejected value.
        value: String,
    },
    /// An `--osm-tag` value failed validation.
    #[error("invalid tag filter {value:?}: {source}")]
    InvalidTag {
        /// The rejected value.
        value: String,
        /// Why the filter was rejected.
        #[source]
        source: TagFilterError,
    },
    /// Constructing the Photon client failed.
    #[error("failed to build Photon client for {base_url:?}: {source}")]
    BuildClient {
        /// Endpoint the client was built for.
        base_url: String,
        /// Underlying construction failure.
        #[source]
        source: ClientBuildError,
    },
    /// Serializing the search results failed.
    #[error("failed to serialize search results: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the search output failed.
    #[error("failed to write search output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// At least one query could not be geocoded.
    #[error("{failed} of {total} queries failed")]
    QueriesFailed {
        /// Number of failed queries.
        failed: usize,
        /// Number of queries attempted.
        total: usize,
    },
}
