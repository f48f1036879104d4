//! Core domain types for the Photon geocoder client.
//!
//! Responsibilities:
//! - Validate OpenStreetMap tag filters against a static vocabulary.
//! - Model addresses returned by the geocoder and their canonical forms.
//! - Rank candidate addresses by edit distance to the query text.
//! - Define the [`Geocoder`] seam implemented by transport adapters.
//!
//! Boundaries:
//! - No I/O. HTTP and wire decoding live in `photon-data`.
//!
//! Invariants:
//! - Every public value object is immutable once constructed.
//! - All functions are pure; the only shared state is the vocabulary memo
//!   cache, which never changes an answer.

#![forbid(unsafe_code)]

pub mod address;
pub mod compare;
pub mod geocoder;
pub mod layer;
pub mod query;
pub mod rank;
pub mod tag;

pub use address::Address;
pub use compare::{TryCompare, TypeMismatchError};
pub use geocoder::{GeocodeError, GeocodeResult, Geocoder};
pub use layer::Layer;
pub use query::{DEFAULT_LIMIT, GeocodeQuery};
pub use rank::{AddressSource, edit_distance, rank_addresses, rank_candidates, rank_scored};
pub use tag::{TagField, TagFilter, TagFilterError, Vocabulary};

#[cfg(feature = "serde")]
pub use tag::VocabularyError;
