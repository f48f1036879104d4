//! Geocoder trait and its result alias.

use crate::{Address, GeocodeQuery};

use super::error::GeocodeError;

/// Ranked addresses for one query, or the reason the query failed.
pub type GeocodeResult = Result<Vec<Address>, GeocodeError>;

/// Resolve free-text address queries into ranked addresses.
///
/// Implementers return candidates ordered by similarity to the query text,
/// closest first (see [`crate::rank_candidates`]).
///
/// # Examples
///
/// ```rust
/// use photon_core::{Address, GeocodeError, GeocodeQuery, GeocodeResult, Geocoder, rank_addresses};
///
/// struct FixedGeocoder(Vec<Address>);
///
/// impl Geocoder for FixedGeocoder {
///     fn geocode(&self, query: &GeocodeQuery) -> GeocodeResult {
///         if query.is_blank() {
///             return Err(GeocodeError::EmptyQuery);
///         }
///         Ok(rank_addresses(query.text(), self.0.clone()))
///     }
/// }
///
/// let geocoder = FixedGeocoder(vec![Address::new("Eichloh", "de", "street")]);
/// let addresses = geocoder.geocode(&GeocodeQuery::new("Eichloh"))?;
/// assert_eq!(addresses.len(), 1);
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait Geocoder {
    /// Resolve `query` into ranked addresses.
    ///
    /// Implementations must return `Err(GeocodeError::EmptyQuery)` when the
    /// query text is blank.
    fn geocode(&self, query: &GeocodeQuery) -> GeocodeResult;

    /// Resolve every query in `queries`, returning one result per query in
    /// input order.
    ///
    /// A failing query never affects its siblings. `fan_out` bounds how many
    /// requests an implementation may have in flight at once; the default
    /// implementation runs them one after another.
    fn geocode_many(&self, queries: &[GeocodeQuery], _fan_out: usize) -> Vec<GeocodeResult> {
        queries.iter().map(|query| self.geocode(query)).collect()
    }
}
