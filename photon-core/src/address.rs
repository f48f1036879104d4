//! Addresses resolved by the geocoder.
//!
//! An [`Address`] carries two derived string forms:
//!
//! - [`Address::normalized`], the minimal `postcode city street number`
//!   concatenation used as the ranking key; and
//! - [`Address::canonical_form`], the richer display form that also drives
//!   equality, hashing and ordering.
//!
//! # Examples
//!
//! ```
//! use photon_core::Address;
//!
//! let address = Address::new("Am Stadtwald", "de", "street")
//!     .with_postcode(Some("66663"))
//!     .with_city(Some("Merzig"))
//!     .with_house_number(Some("5"))
//!     .with_county(Some("Merzig-Wadern"));
//!
//! assert_eq!(address.normalized(), "66663 Merzig Am Stadtwald 5");
//! assert_eq!(
//!     address.to_string(),
//!     "66663 Merzig | Am Stadtwald 5 (Merzig-Wadern) | DE (street)"
//! );
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::compare::TryCompare;

/// A postal address derived from one geocoder result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Address {
    street: String,
    country_code: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    kind: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    postcode: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    city: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    county: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    district: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    house_number: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    state: Option<String>,
}

/// Drop empty strings so they behave exactly like absent parts.
fn present<S: Into<String>>(part: Option<S>) -> Option<String> {
    part.map(Into::into).filter(|text| !text.is_empty())
}

impl Address {
    /// Construct an address from its required parts.
    ///
    /// `kind` is the geocoder's classification, e.g. `street` or `house`.
    pub fn new(
        street: impl Into<String>,
        country_code: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            country_code: country_code.into(),
            kind: kind.into(),
            postcode: None,
            city: None,
            county: None,
            district: None,
            house_number: None,
            state: None,
        }
    }

    /// Set the postcode; `None` or an empty string clears it.
    #[must_use]
    pub fn with_postcode(self, postcode: Option<impl Into<String>>) -> Self {
        Self {
            postcode: present(postcode),
            ..self
        }
    }

    /// Set the city; `None` or an empty string clears it.
    #[must_use]
    pub fn with_city(self, city: Option<impl Into<String>>) -> Self {
        Self {
            city: present(city),
            ..self
        }
    }

    /// Set the county; `None` or an empty string clears it.
    #[must_use]
    pub fn with_county(self, county: Option<impl Into<String>>) -> Self {
        Self {
            county: present(county),
            ..self
        }
    }

    /// Set the district; `None` or an empty string clears it.
    #[must_use]
    pub fn with_district(self, district: Option<impl Into<String>>) -> Self {
        Self {
            district: present(district),
            ..self
        }
    }

    /// Set the house number; `None` or an empty string clears it.
    #[must_use]
    pub fn with_house_number(self, house_number: Option<impl Into<String>>) -> Self {
        Self {
            house_number: present(house_number),
            ..self
        }
    }

    /// Set the state; `None` or an empty string clears it.
    #[must_use]
    pub fn with_state(self, state: Option<impl Into<String>>) -> Self {
        Self {
            state: present(state),
            ..self
        }
    }

    /// Street name, or the feature name when the result had no street.
    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    /// ISO country code as reported by the geocoder.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Result classification, e.g. `street` or `house`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Postal code.
    #[must_use]
    pub fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }

    /// City name.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// County name.
    #[must_use]
    pub fn county(&self) -> Option<&str> {
        self.county.as_deref()
    }

    /// District name.
    #[must_use]
    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    /// House number, kept as text since it may carry suffixes like `5a`.
    #[must_use]
    pub fn house_number(&self) -> Option<&str> {
        self.house_number.as_deref()
    }

    /// State name.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Ranking key: `postcode city street house_number`, empty parts skipped.
    #[must_use]
    pub fn normalized(&self) -> String {
        [
            self.postcode.as_deref(),
            self.city.as_deref(),
            Some(self.street.as_str()),
            self.house_number.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Display form used for equality, hashing, ordering and output.
    ///
    /// Parts appear in the order postcode, city, `(district)`, `| street`,
    /// house number, `| state`, `(county)`, `| COUNTRY`, `(kind)`; absent or
    /// empty parts are skipped entirely.
    #[must_use]
    pub fn canonical_form(&self) -> String {
        let parts = [
            self.postcode.clone(),
            self.city.clone(),
            self.district.as_ref().map(|district| format!("({district})")),
            present(Some(self.street.as_str())).map(|street| format!("| {street}")),
            self.house_number.clone(),
            self.state.as_ref().map(|state| format!("| {state}")),
            self.county.as_ref().map(|county| format!("({county})")),
            present(Some(self.country_code.as_str()))
                .map(|code| format!("| {}", code.to_uppercase())),
            present(Some(self.kind.as_str())).map(|kind| format!("({kind})")),
        ];
        parts.into_iter().flatten().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_form())
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_form() == other.canonical_form()
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_form().hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_form().cmp(&other.canonical_form())
    }
}

impl TryCompare for Address {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::HashSet;

    #[fixture]
    fn merzig() -> Address {
        Address::new("Am Stadtwald", "de", "house")
            .with_postcode(Some("66663"))
            .with_city(Some("Merzig"))
            .with_house_number(Some("5"))
    }

    #[rstest]
    fn normalized_joins_ranking_parts(merzig: Address) {
        assert_eq!(merzig.normalized(), "66663 Merzig Am Stadtwald 5");
    }

    #[rstest]
    fn normalized_skips_missing_parts() {
        let address = Address::new("Finnenbahn", "de", "street").with_city(Some("Augsburg"));
        assert_eq!(address.normalized(), "Augsburg Finnenbahn");
    }

    #[rstest]
    fn display_form_includes_every_part() {
        let address = Address::new("Lange Straße", "de", "house")
            .with_postcode(Some("17438"))
            .with_city(Some("Wolgast"))
            .with_district(Some("X"))
            .with_house_number(Some("12"))
            .with_state(Some("Mecklenburg-Vorpommern"))
            .with_county(Some("Y"));
        assert_eq!(
            address.to_string(),
            "17438 Wolgast (X) | Lange Straße 12 | Mecklenburg-Vorpommern (Y) | DE (house)"
        );
    }

    #[rstest]
    fn display_form_has_no_doubled_separators() {
        let address = Address::new("Eichloh", "", "street")
            .with_district(Some("X"))
            .with_county(Some("Y"))
            .with_city(Some(""));
        let rendered = address.to_string();
        assert_eq!(rendered, "(X) | Eichloh (Y) (street)");
        assert!(!rendered.contains("  "));
        assert!(!rendered.contains("| |"));
    }

    #[rstest]
    fn empty_optional_parts_behave_as_absent() {
        let address = Address::new("Eichloh", "de", "street").with_postcode(Some(""));
        assert_eq!(address.postcode(), None);
        assert_eq!(address, Address::new("Eichloh", "de", "street"));
    }

    #[rstest]
    fn equality_and_hash_follow_display_form(merzig: Address) {
        let twin = merzig.clone();
        let other = merzig.clone().with_house_number(Some("6"));
        assert_eq!(merzig, twin);
        assert_ne!(merzig, other);
        let set: HashSet<Address> = [merzig, twin, other].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[rstest]
    fn ordering_is_lexicographic_on_display_form() {
        let berlin = Address::new("Brandenburgische Straße", "de", "street")
            .with_postcode(Some("12167"))
            .with_city(Some("Berlin"));
        let merzig = Address::new("Am Stadtwald", "de", "street")
            .with_postcode(Some("66663"))
            .with_city(Some("Merzig"));
        let mut addresses = vec![merzig.clone(), berlin.clone()];
        addresses.sort();
        assert_eq!(addresses, vec![berlin, merzig]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_with_type_field(merzig: Address) {
        let value = serde_json::to_value(&merzig).expect("serialise address");
        assert_eq!(value["type"], "house");
        assert_eq!(value["postcode"], "66663");
        assert!(value.get("county").is_none());
    }
}
