//! Allow-list of OSM keys and values accepted by tag filters.
//!
//! The builtin table is materialised once per process and never mutated.
//! Lookups are memoised per [`Vocabulary`] instance, so a cached answer is
//! always tied to the table that produced it.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use parking_lot::RwLock;

/// Upper bound on memoised entries per lookup kind.
///
/// Lookups past the bound are still answered, just not cached.
const MEMO_CAPACITY: usize = 1024;

/// Builtin OSM keys and the values Photon is commonly filtered on.
const BUILTIN_TAGS: &[(&str, &[&str])] = &[
    (
        "highway",
        &[
            "residential", "primary", "secondary", "tertiary", "motorway", "trunk",
            "unclassified", "service", "living_street", "pedestrian", "footway",
            "cycleway", "path", "track", "steps", "bus_stop", "motorway_junction",
            "motorway_link", "trunk_link", "primary_link", "secondary_link",
            "tertiary_link", "road",
        ],
    ),
    (
        "building",
        &[
            "yes", "house", "residential", "apartments", "commercial", "industrial",
            "retail", "school", "church", "garage", "garages", "detached",
            "semidetached_house", "terrace", "hotel", "office", "university",
            "hospital", "warehouse", "farm", "shed", "roof", "public",
            "train_station", "civic", "kindergarten",
        ],
    ),
    (
        "place",
        &[
            "city", "town", "village", "hamlet", "suburb", "neighbourhood", "quarter",
            "isolated_dwelling", "farm", "locality", "island", "state", "county",
            "region", "country", "borough", "city_block", "square", "plot",
        ],
    ),
    (
        "boundary",
        &["administrative", "postal_code", "national_park", "protected_area", "political"],
    ),
    (
        "amenity",
        &[
            "restaurant", "cafe", "bar", "pub", "fast_food", "school", "university",
            "kindergarten", "hospital", "pharmacy", "doctors", "dentist", "bank", "atm",
            "post_office", "police", "fire_station", "townhall", "library", "parking",
            "fuel", "place_of_worship", "cinema", "theatre", "marketplace",
            "community_centre", "bus_station", "taxi", "toilets",
        ],
    ),
    (
        "shop",
        &[
            "supermarket", "bakery", "butcher", "convenience", "clothes", "hairdresser",
            "kiosk", "car", "car_repair", "bicycle", "books", "chemist",
            "department_store", "doityourself", "electronics", "florist", "furniture",
            "hardware", "jewelry", "mall", "optician", "shoes", "sports", "beverages",
        ],
    ),
    (
        "tourism",
        &[
            "hotel", "hostel", "guest_house", "motel", "museum", "attraction",
            "viewpoint", "camp_site", "caravan_site", "information", "artwork",
            "gallery", "picnic_site", "theme_park", "zoo", "apartment", "chalet",
        ],
    ),
    (
        "leisure",
        &[
            "park", "playground", "pitch", "sports_centre", "stadium", "swimming_pool",
            "garden", "golf_course", "nature_reserve", "marina", "fitness_centre",
            "water_park",
        ],
    ),
    (
        "railway",
        &[
            "station", "halt", "tram_stop", "subway_entrance", "platform",
            "level_crossing", "crossing",
        ],
    ),
    (
        "natural",
        &[
            "peak", "water", "wood", "beach", "cliff", "spring", "cave_entrance",
            "volcano", "glacier", "bay", "island", "tree", "wetland",
        ],
    ),
    (
        "landuse",
        &[
            "residential", "commercial", "industrial", "retail", "farmland", "forest",
            "meadow", "cemetery", "allotments", "recreation_ground", "military",
            "railway", "construction", "grass",
        ],
    ),
    (
        "waterway",
        &["river", "stream", "canal", "drain", "dam", "weir", "waterfall", "lock_gate"],
    ),
    (
        "historic",
        &[
            "castle", "monument", "memorial", "ruins", "archaeological_site",
            "wayside_cross", "wayside_shrine", "building", "manor", "church",
        ],
    ),
    (
        "office",
        &["company", "government", "insurance", "lawyer", "estate_agent", "ngo", "association"],
    ),
    ("aeroway", &["aerodrome", "terminal", "helipad", "runway"]),
    (
        "man_made",
        &["tower", "lighthouse", "bridge", "pier", "water_tower", "windmill", "works"],
    ),
    ("public_transport", &["station", "stop_position", "platform"]),
    ("disused:railway", &["station", "halt", "platform"]),
];

static BUILTIN: LazyLock<Vocabulary> = LazyLock::new(|| {
    Vocabulary::new(
        BUILTIN_TAGS
            .iter()
            .map(|(key, values)| (*key, values.iter().copied())),
    )
});

/// Errors returned when loading a custom [`Vocabulary`].
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// The JSON document could not be decoded.
    #[error("failed to parse vocabulary JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Mapping of allowed OSM keys to their permitted values.
///
/// # Examples
///
/// ```
/// use photon_core::Vocabulary;
///
/// let vocabulary = Vocabulary::new([("highway", ["residential", "primary"])]);
/// assert!(vocabulary.is_known_key("highway"));
/// assert!(vocabulary.is_allowed_value("highway", "primary"));
/// assert!(!vocabulary.is_allowed_value("highway", "canal"));
/// ```
#[derive(Debug, Default)]
pub struct Vocabulary {
    tags: HashMap<String, HashSet<String>>,
    known_keys: RwLock<HashMap<String, bool>>,
    allowed_values: RwLock<HashMap<String, HashMap<String, bool>>>,
}

impl Vocabulary {
    /// Build a vocabulary from `(key, values)` pairs.
    ///
    /// Repeated keys merge their value sets.
    pub fn new<I, K, V, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: HashMap<String, HashSet<String>> = HashMap::new();
        for (key, values) in entries {
            tags.entry(key.into())
                .or_default()
                .extend(values.into_iter().map(Into::into));
        }
        Self {
            tags,
            ..Self::default()
        }
    }

    /// Decode a vocabulary from a JSON object of the form
    /// `{"highway": ["residential", "primary"]}`.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError::Parse`] when the document is not such an
    /// object.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::new(raw))
    }

    /// The process-wide builtin vocabulary.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Number of keys in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the vocabulary contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether `key` is part of the vocabulary.
    #[must_use]
    pub fn is_known_key(&self, key: &str) -> bool {
        if let Some(hit) = self.known_keys.read().get(key) {
            return *hit;
        }
        let known = self.tags.contains_key(key);
        let mut memo = self.known_keys.write();
        if memo.len() < MEMO_CAPACITY {
            memo.insert(key.to_owned(), known);
        }
        known
    }

    /// Whether `value` is permitted for `key`.
    ///
    /// Unknown keys permit no values.
    #[must_use]
    pub fn is_allowed_value(&self, key: &str, value: &str) -> bool {
        if let Some(hit) = self
            .allowed_values
            .read()
            .get(key)
            .and_then(|values| values.get(value))
        {
            return *hit;
        }
        let allowed = self
            .tags
            .get(key)
            .is_some_and(|values| values.contains(value));
        let mut memo = self.allowed_values.write();
        let cached: usize = memo.values().map(HashMap::len).sum();
        if cached < MEMO_CAPACITY {
            memo.entry(key.to_owned())
                .or_default()
                .insert(value.to_owned(), allowed);
        }
        allowed
    }

    /// Iterate over the keys of the vocabulary in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TagFilter, TagFilterError};
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("highway", true)]
    #[case("disused:railway", true)]
    #[case("highways", false)]
    #[case("", false)]
    fn builtin_knows_keys(#[case] key: &str, #[case] expected: bool) {
        assert_eq!(Vocabulary::builtin().is_known_key(key), expected);
    }

    #[rstest]
    #[case("highway", "residential", true)]
    #[case("building", "yes", true)]
    #[case("highway", "castle", false)]
    #[case("unknown", "residential", false)]
    fn builtin_checks_values(#[case] key: &str, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(Vocabulary::builtin().is_allowed_value(key, value), expected);
    }

    #[rstest]
    fn repeated_lookups_agree() {
        let vocabulary = Vocabulary::new([("shop", ["bakery"])]);
        for _ in 0..3 {
            assert!(vocabulary.is_known_key("shop"));
            assert!(vocabulary.is_allowed_value("shop", "bakery"));
            assert!(!vocabulary.is_allowed_value("shop", "butcher"));
        }
    }

    #[rstest]
    fn caches_do_not_leak_between_vocabularies() {
        let first = Vocabulary::new([("shop", ["bakery"])]);
        let second = Vocabulary::new([("amenity", ["cafe"])]);
        assert!(first.is_known_key("shop"));
        assert!(!second.is_known_key("shop"));
        assert!(second.is_allowed_value("amenity", "cafe"));
        assert!(!first.is_allowed_value("amenity", "cafe"));
    }

    #[rstest]
    fn lookups_past_capacity_are_still_answered() {
        let vocabulary = Vocabulary::new([("shop", ["bakery"])]);
        for i in 0..(MEMO_CAPACITY + 10) {
            assert!(!vocabulary.is_known_key(&format!("key_{i}")));
        }
        assert!(vocabulary.is_known_key("shop"));
    }

    #[rstest]
    fn repeated_keys_merge_values() {
        let vocabulary = Vocabulary::new([("shop", vec!["bakery"]), ("shop", vec!["butcher"])]);
        assert_eq!(vocabulary.len(), 1);
        assert!(vocabulary.is_allowed_value("shop", "bakery"));
        assert!(vocabulary.is_allowed_value("shop", "butcher"));
    }

    #[rstest]
    #[case(false, "")]
    #[case(true, "!")]
    fn every_builtin_pair_builds_renders_and_parses(#[case] negate: bool, #[case] prefix: &str) {
        for (key, values) in BUILTIN_TAGS {
            for value in *values {
                let filter = TagFilter::new(Some(*key), Some(*value), negate)
                    .unwrap_or_else(|err| panic!("{key}:{value} rejected: {err}"));
                let text = filter.to_string();
                assert_eq!(text, format!("{prefix}{key}:{value}"));
                let parsed: TagFilter = text
                    .parse()
                    .unwrap_or_else(|err| panic!("{text} did not parse: {err}"));
                assert_eq!(parsed, filter);
            }
        }
    }

    proptest! {
        #[test]
        fn keys_outside_the_builtin_table_are_rejected(
            key in "[a-z0-9_:]{3,24}"
                .prop_filter("key must be unknown", |key| !Vocabulary::builtin().is_known_key(key))
        ) {
            let err = TagFilter::key(&key).expect_err("unknown key must be rejected");
            prop_assert_eq!(err, TagFilterError::UnknownKey { key: key.clone() });
        }
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn loads_from_json() {
        let vocabulary = Vocabulary::from_json(r#"{"leisure": ["park", "garden"]}"#)
            .expect("valid vocabulary JSON");
        assert!(vocabulary.is_allowed_value("leisure", "garden"));
        assert!(!vocabulary.is_known_key("highway"));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn rejects_malformed_json() {
        let err = Vocabulary::from_json(r#"["leisure"]"#).expect_err("array is not a vocabulary");
        assert!(matches!(err, VocabularyError::Parse(_)));
    }
}
