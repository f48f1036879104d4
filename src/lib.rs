//! Facade crate for the Photon geocoder client.
//!
//! This crate re-exports the core domain types and exposes the HTTP client
//! behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use photon_core::{
    Address, AddressSource, DEFAULT_LIMIT, GeocodeError, GeocodeQuery, GeocodeResult, Geocoder,
    Layer, TagField, TagFilter, TagFilterError, TryCompare, TypeMismatchError, Vocabulary,
    edit_distance, rank_addresses, rank_candidates, rank_scored,
};

#[cfg(feature = "serde")]
pub use photon_core::VocabularyError;

#[cfg(feature = "http")]
pub use photon_data::{ClientBuildError, DEFAULT_BASE_URL, PhotonClient, PhotonClientConfig};
