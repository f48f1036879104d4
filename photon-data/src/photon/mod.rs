//! HTTP geocoding against a Photon instance.
//!
//! This module provides [`PhotonClient`], an implementation of
//! [`photon_core::Geocoder`] that queries Photon's `/api` endpoint and ranks
//! the returned features by similarity to the query text.
//!
//! # Architecture
//!
//! The client issues HTTP requests with `reqwest`. The synchronous
//! [`Geocoder`](photon_core::Geocoder) trait is implemented by blocking on
//! the async calls internally, keeping the core library embeddable in
//! synchronous contexts. Batches run concurrently up to a caller-chosen
//! fan-out.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use photon_core::{GeocodeQuery, Geocoder, Layer};
//! use photon_data::photon::{PhotonClient, PhotonClientConfig};
//!
//! let config = PhotonClientConfig::new("https://photon.komoot.io/api")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let client = PhotonClient::with_config(config)?;
//!
//! let query = GeocodeQuery::new("66663 Merzig Am Stadtwald 5")
//!     .with_layers([Layer::Street, Layer::House]);
//! for address in client.geocode(&query)? {
//!     println!("{address}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod models;
mod request;

#[doc(hidden)]
pub mod test_support;

pub use client::{
    ClientBuildError, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, PhotonClient, PhotonClientConfig,
};
pub use models::{Feature, FeatureCollection, Geometry, Properties};
pub use request::search_url;
