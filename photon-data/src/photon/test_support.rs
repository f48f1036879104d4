//! Test utilities for geocoders.
//!
//! This module provides [`StubGeocoder`], a deterministic test double for
//! [`Geocoder`] that ranks a canned Photon response without making actual
//! HTTP requests.

use std::collections::HashMap;

use photon_core::{GeocodeError, GeocodeQuery, GeocodeResult, Geocoder};

use super::models::FeatureCollection;

/// Stub `Geocoder` for testing.
///
/// Every query is answered from the same feature collection, ranked against
/// the query text exactly as [`super::PhotonClient`] ranks live responses.
///
/// # Example
///
/// ```
/// use photon_core::{GeocodeQuery, Geocoder};
/// use photon_data::photon::test_support::StubGeocoder;
///
/// let geocoder = StubGeocoder::from_json(
///     r#"{"features": [{
///         "geometry": {"coordinates": [6.63, 49.44]},
///         "properties": {"countrycode": "DE", "type": "street", "name": "Am Stadtwald"}
///     }]}"#,
/// )?;
///
/// let addresses = geocoder.geocode(&GeocodeQuery::new("Am Stadtwald"))?;
/// assert_eq!(addresses[0].street(), "Am Stadtwald");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubGeocoder {
    response: StubResponse,
    failures: HashMap<String, GeocodeError>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Features(FeatureCollection),
    Error(GeocodeError),
}

impl StubGeocoder {
    /// Create a geocoder that answers every query from `collection`.
    #[must_use]
    pub fn with_features(collection: FeatureCollection) -> Self {
        Self {
            response: StubResponse::Features(collection),
            failures: HashMap::new(),
        }
    }

    /// Create a geocoder from a raw Photon response body.
    ///
    /// # Errors
    ///
    /// Returns the decode error when `body` is not a feature collection.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body).map(Self::with_features)
    }

    /// Create a geocoder that returns the given error.
    ///
    /// The error will be returned for any non-blank query.
    /// Blank queries still return `GeocodeError::EmptyQuery`.
    #[must_use]
    pub fn with_error(error: GeocodeError) -> Self {
        Self {
            response: StubResponse::Error(error),
            failures: HashMap::new(),
        }
    }

    /// Fail queries whose text is exactly `text` with `error`.
    #[must_use]
    pub fn failing_on(mut self, text: impl Into<String>, error: GeocodeError) -> Self {
        self.failures.insert(text.into(), error);
        self
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, query: &GeocodeQuery) -> GeocodeResult {
        if query.is_blank() {
            return Err(GeocodeError::EmptyQuery);
        }
        if let Some(error) = self.failures.get(query.text()) {
            return Err(error.clone());
        }

        match &self.response {
            StubResponse::Features(collection) => Ok(collection.rank(query.text())),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
