//! Similarity ranking of geocoder candidates.
//!
//! Photon returns candidates in its own relevance order. The ranker re-sorts
//! them by Levenshtein distance between the caller's raw query and each
//! candidate's [`Address::normalized`] form, closest first. The sort is
//! stable, so candidates at equal distance keep the service's order.
//!
//! The query is not normalised in any way; casing, accents and whitespace all
//! count towards the distance.
//!
//! # Examples
//!
//! ```
//! use photon_core::{Address, rank_addresses};
//!
//! let near = Address::new("Am Stadtwald", "de", "house")
//!     .with_postcode(Some("66663"))
//!     .with_city(Some("Merzig"))
//!     .with_house_number(Some("5"));
//! let far = near.clone().with_house_number(Some("50"));
//!
//! let ranked = rank_addresses("66663 Merzig Am Stadtwald 5", vec![far, near.clone()]);
//! assert_eq!(ranked.first(), Some(&near));
//! ```

use log::debug;

use crate::Address;

/// A raw geocoder record that may describe an address.
pub trait AddressSource {
    /// Map the record to an [`Address`].
    ///
    /// Returns `None` when the record has neither a street nor a fallback
    /// name; such records are not rankable.
    fn to_address(&self) -> Option<Address>;
}

impl AddressSource for Address {
    fn to_address(&self) -> Option<Address> {
        (!self.street().is_empty()).then(|| self.clone())
    }
}

/// Levenshtein distance with unit costs, counted in Unicode scalar values.
#[must_use]
pub fn edit_distance(lhs: &str, rhs: &str) -> usize {
    strsim::levenshtein(lhs, rhs)
}

/// Map `candidates` to addresses, drop unrankable ones and rank the rest.
pub fn rank_candidates<C: AddressSource>(query: &str, candidates: &[C]) -> Vec<Address> {
    let addresses: Vec<Address> = candidates
        .iter()
        .filter_map(AddressSource::to_address)
        .collect();
    let dropped = candidates.len() - addresses.len();
    if dropped > 0 {
        debug!("dropped {dropped} candidate(s) without street or name for query {query:?}");
    }
    rank_addresses(query, addresses)
}

/// Sort `addresses` by edit distance to `query`, closest first.
pub fn rank_addresses(query: &str, addresses: Vec<Address>) -> Vec<Address> {
    rank_scored(query, addresses)
        .into_iter()
        .map(|(address, _)| address)
        .collect()
}

/// Like [`rank_addresses`], but keeps each address's distance alongside it.
pub fn rank_scored(query: &str, addresses: Vec<Address>) -> Vec<(Address, usize)> {
    let mut scored: Vec<(Address, usize)> = addresses
        .into_iter()
        .map(|address| {
            let distance = edit_distance(&address.normalized(), query);
            (address, distance)
        })
        .collect();
    // `sort_by_key` is stable: equal distances keep their input order.
    scored.sort_by_key(|(_, distance)| *distance);
    scored
}
