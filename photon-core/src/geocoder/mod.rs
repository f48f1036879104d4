//! Resolve address queries through an external geocoding service.
//!
//! The [`Geocoder`] trait abstracts the transport. Callers hand over a
//! [`GeocodeQuery`](crate::GeocodeQuery) and receive ranked
//! [`Address`](crate::Address) values, closest match first.
//!
//! Errors describe why the service could not be asked or did not answer; they
//! never come from ranking, which cannot fail.

mod error;
mod provider;

pub use error::GeocodeError;
pub use provider::{GeocodeResult, Geocoder};
