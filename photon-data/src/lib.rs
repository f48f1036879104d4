//! Photon service adapters for the geocoder client.
//!
//! Responsibilities:
//! - Render [`GeocodeQuery`](photon_core::GeocodeQuery) values into Photon
//!   request URLs.
//! - Execute requests over HTTP and decode the GeoJSON response.
//! - Map raw features to addresses and hand them to the core ranker.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `photon-core`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod photon;

pub use photon::{ClientBuildError, DEFAULT_BASE_URL, PhotonClient, PhotonClientConfig};
