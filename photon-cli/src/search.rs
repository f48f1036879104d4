//! Search command implementation for the Photon CLI.

use std::io::Write;
use std::num::NonZeroU32;
use std::time::Duration;

use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use photon_core::{Address, GeocodeQuery, GeocodeResult, Geocoder, Layer, TagFilter, edit_distance};
use photon_data::{PhotonClient, PhotonClientConfig};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BASE_URL, ARG_FAN_OUT, ARG_HOST, ARG_LAYER, ARG_LIMIT, ARG_OSM_TAG, ARG_PORT, ARG_QUERY,
    ARG_TIMEOUT_SECS, CliError, ENV_QUERY,
};

/// Concurrent requests used when `--fan-out` is not given.
pub(crate) const DEFAULT_FAN_OUT: usize = 4;

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode one or more free-text address queries. Results from \
                 the Photon service are ranked by edit distance to the query \
                 text, closest first. Options can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Geocode address queries"
)]
#[ortho_config(prefix = "PHOTON")]
pub(crate) struct SearchArgs {
    /// Free-text address queries, e.g. "66663 Merzig Am Stadtwald 5".
    #[arg(value_name = ARG_QUERY)]
    #[serde(default)]
    pub(crate) query: Vec<String>,
    /// Photon search endpoint (e.g. "http://localhost:2322/api").
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Photon host, used with --port when no base URL is given.
    #[arg(long = ARG_HOST, value_name = "host")]
    #[serde(default)]
    pub(crate) host: Option<String>,
    /// Photon port, used with --host when no base URL is given.
    #[arg(long = ARG_PORT, value_name = "port")]
    #[serde(default)]
    pub(crate) port: Option<u16>,
    /// Maximum number of results per query (default 10).
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<u32>,
    /// Preferred result layer; repeat for several.
    #[arg(long = ARG_LAYER, value_name = "layer")]
    #[serde(default)]
    pub(crate) layer: Vec<String>,
    /// OSM tag filter such as "highway", "!place:city" or ":residential".
    #[arg(long = ARG_OSM_TAG, value_name = "tag")]
    #[serde(default)]
    pub(crate) osm_tag: Vec<String>,
    /// Maximum number of requests in flight (default 4).
    #[arg(long = ARG_FAN_OUT, value_name = "n")]
    #[serde(default)]
    pub(crate) fan_out: Option<usize>,
    /// Request timeout in seconds (default 30).
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Print results as JSON.
    #[arg(long)]
    #[serde(default)]
    pub(crate) json: bool,
    /// Include each address's edit distance to the query.
    #[arg(long)]
    #[serde(default)]
    pub(crate) scores: bool,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// How search results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct SearchConfig {
    /// Validated queries, in the order given.
    pub(crate) queries: Vec<GeocodeQuery>,
    /// Transport settings for the Photon client.
    pub(crate) client: PhotonClientConfig,
    /// Maximum number of requests in flight.
    pub(crate) fan_out: usize,
    /// Rendering of the results.
    pub(crate) format: OutputFormat,
    /// Whether distances are printed alongside addresses.
    pub(crate) scores: bool,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        if args.query.is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_QUERY,
                env: ENV_QUERY,
            });
        }

        let limit = match args.limit {
            Some(limit) => NonZeroU32::new(limit).ok_or(CliError::ZeroLimit { field: ARG_LIMIT })?,
            None => photon_core::DEFAULT_LIMIT,
        };
        let layers = args
            .layer
            .iter()
            .map(|value| parse_layer(value))
            .collect::<Result<Vec<_>, _>>()?;
        let tags = args
            .osm_tag
            .iter()
            .map(|value| parse_tag(value))
            .collect::<Result<Vec<_>, _>>()?;

        let queries = args
            .query
            .into_iter()
            .map(|text| {
                GeocodeQuery::new(text)
                    .with_limit(limit)
                    .with_layers(layers.iter().copied())
                    .with_tags(tags.iter().cloned())
            })
            .collect();

        let host = args.host;
        let port = args.port;
        let mut client = args.base_url.map_or_else(
            || PhotonClientConfig::from_parts(host.as_deref(), port),
            PhotonClientConfig::new,
        );
        if let Some(secs) = args.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            queries,
            client,
            fan_out: args.fan_out.unwrap_or(DEFAULT_FAN_OUT).max(1),
            format: if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            scores: args.scores,
        })
    }
}

fn parse_layer(value: &str) -> Result<Layer, CliError> {
    value.parse().map_err(|_| CliError::InvalidLayer {
        value: value.to_owned(),
    })
}

fn parse_tag(value: &str) -> Result<TagFilter, CliError> {
    value.parse().map_err(|source| CliError::InvalidTag {
        value: value.to_owned(),
        source,
    })
}

/// Builds a geocoder for the current search invocation.
pub(crate) trait GeocoderBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn Geocoder>, CliError>;
}

pub(crate) struct PhotonGeocoderBuilder;

impl GeocoderBuilder for PhotonGeocoderBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let client = PhotonClient::with_config(config.client.clone()).map_err(|source| {
            CliError::BuildClient {
                base_url: config.client.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(client))
    }
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_search_with(args, &PhotonGeocoderBuilder, &mut stdout)
}

pub(crate) fn run_search_with(
    args: SearchArgs,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_search(&config, builder, writer)
}

/// Geocode every configured query, write the report and fail if any query
/// failed.
pub(crate) fn execute_search(
    config: &SearchConfig,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let geocoder = builder.build(config)?;
    info!(
        "geocoding {} queries against {} with fan-out {}",
        config.queries.len(),
        config.client.base_url,
        config.fan_out
    );
    let results = geocoder.geocode_many(&config.queries, config.fan_out);

    let reports: Vec<QueryReport<'_>> = config
        .queries
        .iter()
        .zip(&results)
        .map(|(query, result)| QueryReport::new(query.text(), result, config.scores))
        .collect();

    match config.format {
        OutputFormat::Text => write_text(writer, &reports)?,
        OutputFormat::Json => write_json(writer, &reports)?,
    }

    let failed = reports.iter().filter(|report| report.error.is_some()).count();
    if failed > 0 {
        return Err(CliError::QueriesFailed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

/// Outcome of one query as printed by the CLI.
#[derive(Debug, Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    addresses: Option<Vec<ScoredAddress<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> QueryReport<'a> {
    fn new(query: &'a str, result: &'a GeocodeResult, scores: bool) -> Self {
        match result {
            Ok(addresses) => Self {
                query,
                addresses: Some(
                    addresses
                        .iter()
                        .map(|address| ScoredAddress {
                            distance: scores.then(|| edit_distance(&address.normalized(), query)),
                            address,
                        })
                        .collect(),
                ),
                error: None,
            },
            Err(err) => {
                warn!("query {query:?} failed: {err}");
                Self {
                    query,
                    addresses: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ScoredAddress<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<usize>,
    #[serde(flatten)]
    address: &'a Address,
}

fn write_text(writer: &mut dyn Write, reports: &[QueryReport<'_>]) -> Result<(), CliError> {
    for report in reports {
        writeln!(writer, "{}", report.query).map_err(CliError::WriteOutput)?;
        if let Some(error) = &report.error {
            writeln!(writer, "  error: {error}").map_err(CliError::WriteOutput)?;
        }
        for scored in report.addresses.iter().flatten() {
            let written = match scored.distance {
                Some(distance) => writeln!(writer, "  [{distance}] {}", scored.address),
                None => writeln!(writer, "  {}", scored.address),
            };
            written.map_err(CliError::WriteOutput)?;
        }
    }
    Ok(())
}

fn write_json(writer: &mut dyn Write, reports: &[QueryReport<'_>]) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(reports).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
