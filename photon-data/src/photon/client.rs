//! HTTP-based `Geocoder` using Photon's search API.
//!
//! This module provides [`PhotonClient`], an implementation of the
//! [`Geocoder`] trait that fetches candidates from a Photon instance via HTTP
//! and ranks them with the core ranker.
//!
//! # Architecture
//!
//! The [`Geocoder`] trait is synchronous to keep the core library embeddable
//! in synchronous contexts. This client bridges the async HTTP calls to the
//! sync interface by blocking on a Tokio runtime internally.

use std::future::Future;
use std::time::Duration;

use futures_util::{StreamExt, stream};
use log::debug;
use photon_core::{GeocodeError, GeocodeQuery, GeocodeResult, Geocoder};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::models::FeatureCollection;
use super::request::search_url;

/// Error type for [`PhotonClient`] construction failures.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for Photon requests.
pub const DEFAULT_USER_AGENT: &str = "photon-geocoder/0.1";

/// Search endpoint of a Photon instance running locally on its default port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:2322/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`PhotonClient`].
#[derive(Debug, Clone)]
pub struct PhotonClientConfig {
    /// Search endpoint of the Photon service (e.g. `"http://localhost:2322/api"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for PhotonClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl PhotonClientConfig {
    /// Create a new configuration with the given search endpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Derive the search endpoint from an optional host and port.
    ///
    /// - host and port: `{host}:{port}/api`
    /// - host only: `{host}/api`
    /// - port only: `http://localhost:{port}/api`
    /// - neither: [`DEFAULT_BASE_URL`]
    ///
    /// # Examples
    ///
    /// ```
    /// use photon_data::PhotonClientConfig;
    ///
    /// let config = PhotonClientConfig::from_parts(Some("http://geo.internal"), Some(8080));
    /// assert_eq!(config.base_url, "http://geo.internal:8080/api");
    /// ```
    #[must_use]
    pub fn from_parts(host: Option<&str>, port: Option<u16>) -> Self {
        let base_url = match (host, port) {
            (Some(host), Some(port)) => format!("{host}:{port}/api"),
            (Some(host), None) => format!("{host}/api"),
            (None, Some(port)) => format!("http://localhost:{port}/api"),
            (None, None) => DEFAULT_BASE_URL.to_owned(),
        };
        Self::new(base_url)
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP geocoder backed by a Photon instance.
///
/// This client implements the synchronous [`Geocoder`] trait by internally
/// blocking on asynchronous HTTP requests. It owns a Tokio runtime that is
/// reused across calls, avoiding the overhead of creating a new runtime per
/// request. The async methods can be awaited directly from async code.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the client uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics.
///
/// When called from within a `current_thread` Tokio runtime, the client
/// falls back to using its own internal runtime. This avoids the panic that
/// `block_in_place` would cause, but may lead to deadlocks if the caller's
/// runtime is driving IO or timers that this request depends on.
pub struct PhotonClient {
    client: Client,
    config: PhotonClientConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for PhotonClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotonClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl PhotonClient {
    /// Create a new client with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Search endpoint (e.g., `"http://localhost:2322/api"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(PhotonClientConfig::new(base_url))
    }

    /// Create a new client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: PhotonClientConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &PhotonClientConfig {
        &self.config
    }

    /// Build the search URL for `query`.
    fn build_search_url(&self, query: &GeocodeQuery) -> Result<Url, GeocodeError> {
        search_url(&self.config.base_url, query)
    }

    /// Geocode `query` asynchronously.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::EmptyQuery`] for blank text, and a transport
    /// or parse error when the service cannot be reached or answers with
    /// something other than a feature collection.
    pub async fn geocode_async(&self, query: &GeocodeQuery) -> GeocodeResult {
        if query.is_blank() {
            return Err(GeocodeError::EmptyQuery);
        }
        let url = self.build_search_url(query)?;
        debug!("querying Photon at {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;

        let collection: FeatureCollection =
            response
                .json()
                .await
                .map_err(|err| GeocodeError::ParseError {
                    message: err.to_string(),
                })?;

        debug!(
            "Photon returned {} feature(s) for {:?}",
            collection.features.len(),
            query.text()
        );
        Ok(collection.rank(query.text()))
    }

    /// Geocode every query with at most `fan_out` requests in flight.
    ///
    /// Results are returned in input order. A `fan_out` of zero is treated
    /// as one.
    pub async fn geocode_many_async(
        &self,
        queries: &[GeocodeQuery],
        fan_out: usize,
    ) -> Vec<GeocodeResult> {
        stream::iter(queries)
            .map(|query| self.geocode_async(query))
            .buffered(fan_out.max(1))
            .collect()
            .await
    }

    /// Convert a reqwest error to a `GeocodeError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return GeocodeError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        GeocodeError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// `block_in_place` requires a multi-threaded runtime; for
    /// `current_thread` runtimes we fall back to our own stored runtime.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}

impl Geocoder for PhotonClient {
    /// Geocode `query`, blocking until the service answers.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded (`flavor = "multi_thread"`). If called from within a
    /// `current_thread` runtime, the method falls back to using its own
    /// internal runtime, which may block the caller's runtime.
    fn geocode(&self, query: &GeocodeQuery) -> GeocodeResult {
        self.block_on(self.geocode_async(query))
    }

    fn geocode_many(&self, queries: &[GeocodeQuery], fan_out: usize) -> Vec<GeocodeResult> {
        self.block_on(self.geocode_many_async(queries, fan_out))
    }
}
