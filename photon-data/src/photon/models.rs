//! Photon API response types.
//!
//! Photon answers `/api` searches with a GeoJSON `FeatureCollection`. Only
//! the fields needed to build an [`Address`] are decoded; anything else in
//! the payload is ignored.
//!
//! See: <https://github.com/komoot/photon#search-api>

use photon_core::{Address, AddressSource, rank_candidates};
use serde::Deserialize;

/// Top-level Photon response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    /// Matching features in the service's own relevance order.
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Map the features to addresses and rank them against `query`.
    ///
    /// Features with neither a street nor a name are dropped.
    #[must_use]
    pub fn rank(&self, query: &str) -> Vec<Address> {
        rank_candidates(query, &self.features)
    }
}

/// One search result.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    /// Point geometry of the result.
    pub geometry: Geometry,
    /// Descriptive properties of the result.
    pub properties: Properties,
}

impl AddressSource for Feature {
    fn to_address(&self) -> Option<Address> {
        self.properties.to_address()
    }
}

/// GeoJSON point geometry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude]` in WGS84.
    pub coordinates: (f64, f64),
}

/// Properties of a Photon feature.
///
/// Photon omits fields that do not apply to a result, so everything except
/// the classification is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    /// OSM element type: `N`, `W` or `R`.
    pub osm_type: Option<String>,
    /// OSM element identifier.
    pub osm_id: Option<i64>,
    /// OSM key the feature was indexed under, e.g. `highway`.
    pub osm_key: Option<String>,
    /// OSM value the feature was indexed under, e.g. `residential`.
    pub osm_value: Option<String>,
    /// Country name in the response language.
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default)]
    pub countrycode: String,
    /// Result classification, e.g. `street` or `house`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Bounding box `[min_lon, max_lat, max_lon, min_lat]` for area results.
    pub extent: Option<Vec<f64>>,
    /// Feature name, used as the street when no street is present.
    pub name: Option<String>,
    /// Street name.
    pub street: Option<String>,
    /// House number.
    pub housenumber: Option<String>,
    /// Postal code.
    pub postcode: Option<String>,
    /// Locality below district level.
    pub locality: Option<String>,
    /// City district.
    pub district: Option<String>,
    /// City, town or village.
    pub city: Option<String>,
    /// County.
    pub county: Option<String>,
    /// State or province.
    pub state: Option<String>,
}

impl Properties {
    /// Street name, falling back to the feature name.
    #[must_use]
    pub fn street_or_name(&self) -> Option<&str> {
        [self.street.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.is_empty())
    }
}

impl AddressSource for Properties {
    fn to_address(&self) -> Option<Address> {
        let street = self.street_or_name()?;
        Some(
            Address::new(street, self.countrycode.as_str(), self.kind.as_str())
                .with_postcode(self.postcode.as_deref())
                .with_city(self.city.as_deref())
                .with_county(self.county.as_deref())
                .with_district(self.district.as_deref())
                .with_house_number(self.housenumber.as_deref())
                .with_state(self.state.as_deref()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RESPONSE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [6.6379, 49.4439]},
                "properties": {
                    "osm_type": "W", "osm_id": 28397211, "osm_key": "highway",
                    "osm_value": "residential", "country": "Deutschland",
                    "countrycode": "DE", "type": "street", "name": "Am Stadtwald",
                    "postcode": "66663", "city": "Merzig", "county": "Merzig-Wadern",
                    "state": "Saarland", "extent": [6.63, 49.45, 6.64, 49.44]
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [6.6382, 49.4441]},
                "properties": {
                    "osm_type": "N", "osm_id": 3344, "country": "Deutschland",
                    "countrycode": "DE", "type": "house", "street": "Am Stadtwald",
                    "housenumber": "5", "postcode": "66663", "city": "Merzig"
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [6.7, 49.5]},
                "properties": {
                    "osm_type": "R", "osm_id": 62410, "countrycode": "DE",
                    "type": "county"
                }
            }
        ]
    }"#;

    #[rstest]
    fn deserialise_feature_collection() {
        let collection: FeatureCollection =
            serde_json::from_str(RESPONSE).expect("should deserialise");

        assert_eq!(collection.features.len(), 3);
        let first = &collection.features[0];
        assert_eq!(first.geometry.coordinates, (6.6379, 49.4439));
        assert_eq!(first.properties.osm_id, Some(28_397_211));
        assert_eq!(first.properties.kind, "street");
        assert_eq!(first.properties.street, None);
        assert_eq!(first.properties.name.as_deref(), Some("Am Stadtwald"));
    }

    #[rstest]
    fn name_stands_in_for_missing_street() {
        let properties = Properties {
            name: Some("Finnenbahn".to_owned()),
            countrycode: "DE".to_owned(),
            kind: "street".to_owned(),
            ..Properties::default()
        };
        let address = properties.to_address().expect("name is a street fallback");
        assert_eq!(address.street(), "Finnenbahn");
    }

    #[rstest]
    fn street_wins_over_name() {
        let properties = Properties {
            name: Some("Rathaus".to_owned()),
            street: Some("Poststraße".to_owned()),
            ..Properties::default()
        };
        assert_eq!(properties.street_or_name(), Some("Poststraße"));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(None, Some(""))]
    fn features_without_street_or_name_are_unrankable(
        #[case] street: Option<&str>,
        #[case] name: Option<&str>,
    ) {
        let properties = Properties {
            street: street.map(str::to_owned),
            name: name.map(str::to_owned),
            ..Properties::default()
        };
        assert!(properties.to_address().is_none());
    }

    #[rstest]
    fn rank_drops_unnamed_and_orders_by_distance() {
        let collection: FeatureCollection =
            serde_json::from_str(RESPONSE).expect("should deserialise");

        let ranked = collection.rank("66663 Merzig Am Stadtwald 5");

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].house_number(), Some("5"));
        assert_eq!(ranked[1].house_number(), None);
        assert_eq!(ranked[1].county(), Some("Merzig-Wadern"));
    }

    #[rstest]
    fn missing_features_decode_as_empty() {
        let collection: FeatureCollection =
            serde_json::from_str(r#"{"type": "FeatureCollection"}"#).expect("should deserialise");
        assert!(collection.rank("anything").is_empty());
    }
}
