//! Stub geocoders and canned responses shared by the CLI tests.

use super::*;
use crate::search::{GeocoderBuilder, SearchConfig};
use photon_core::{GeocodeError, Geocoder};
use photon_data::photon::test_support::StubGeocoder;

/// Two streets and a house in Merzig, plus a boundary without a name.
pub(super) const MERZIG_RESPONSE: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [6.6379, 49.4439]},
            "properties": {
                "countrycode": "DE", "type": "street", "name": "Am Stadtwald",
                "postcode": "66663", "city": "Merzig", "state": "Saarland"
            }
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [6.6382, 49.4441]},
            "properties": {
                "countrycode": "DE", "type": "house", "street": "Am Stadtwald",
                "housenumber": "5", "postcode": "66663", "city": "Merzig",
                "state": "Saarland"
            }
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [6.7, 49.5]},
            "properties": {"countrycode": "DE", "type": "county"}
        }
    ]
}"#;

pub(super) const MERZIG_QUERY: &str = "66663 Merzig Am Stadtwald 5";

pub(super) fn merzig_geocoder() -> StubGeocoder {
    StubGeocoder::from_json(MERZIG_RESPONSE).expect("fixture should decode")
}

pub(super) fn network_error() -> GeocodeError {
    GeocodeError::NetworkError {
        url: "http://localhost:2322/api".to_owned(),
        message: "connection refused".to_owned(),
    }
}

/// Hands out clones of a prepared stub instead of building a real client.
#[derive(Debug)]
pub(super) struct StubGeocoderBuilder {
    pub(super) geocoder: StubGeocoder,
}

impl GeocoderBuilder for StubGeocoderBuilder {
    fn build(&self, _config: &SearchConfig) -> Result<Box<dyn Geocoder>, CliError> {
        Ok(Box::new(self.geocoder.clone()))
    }
}
