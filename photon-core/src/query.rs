//! Geocoding requests as the caller describes them.

use std::num::NonZeroU32;

use crate::{Layer, TagFilter};

/// Number of results requested when the caller does not choose a limit.
pub const DEFAULT_LIMIT: NonZeroU32 = NonZeroU32::MIN.saturating_add(9);

/// One address search against the geocoder.
///
/// The text is kept exactly as supplied: ranking compares it untouched
/// against each candidate.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU32;
/// use photon_core::{GeocodeQuery, Layer, TagFilter};
///
/// let query = GeocodeQuery::new("66663 Merzig Am Stadtwald 5")
///     .with_limit(NonZeroU32::new(5).expect("non-zero"))
///     .with_layers([Layer::Street, Layer::House])
///     .with_tag(TagFilter::key("highway")?);
/// assert_eq!(query.limit().get(), 5);
/// assert_eq!(query.layers().len(), 2);
/// # Ok::<(), photon_core::TagFilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeQuery {
    text: String,
    limit: NonZeroU32,
    layers: Vec<Layer>,
    tags: Vec<TagFilter>,
}

impl GeocodeQuery {
    /// Create a query for `text` with the default limit and no filters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: DEFAULT_LIMIT,
            layers: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Set the maximum number of results requested.
    #[must_use]
    pub fn with_limit(mut self, limit: NonZeroU32) -> Self {
        self.limit = limit;
        self
    }

    /// Add a preferred result layer.
    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Add several preferred result layers.
    #[must_use]
    pub fn with_layers(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Add a tag filter. Filters are combined with AND by the service.
    #[must_use]
    pub fn with_tag(mut self, tag: TagFilter) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add several tag filters.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagFilter>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// The raw query text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Maximum number of results requested.
    #[must_use]
    pub const fn limit(&self) -> NonZeroU32 {
        self.limit
    }

    /// Preferred result layers.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Tag filters.
    #[must_use]
    pub fn tags(&self) -> &[TagFilter] {
        &self.tags
    }

    /// Whether the text has no searchable content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_ten_results_without_filters() {
        let query = GeocodeQuery::new("Berlin");
        assert_eq!(query.limit(), DEFAULT_LIMIT);
        assert!(query.layers().is_empty());
        assert!(query.tags().is_empty());
    }

    #[rstest]
    fn keeps_text_untouched() {
        let query = GeocodeQuery::new("  Merzig ");
        assert_eq!(query.text(), "  Merzig ");
        assert!(!query.is_blank());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn detects_blank_text(#[case] text: &str) {
        assert!(GeocodeQuery::new(text).is_blank());
    }

    #[rstest]
    fn collects_layers_and_tags_in_order() {
        let query = GeocodeQuery::new("Berlin")
            .with_layer(Layer::City)
            .with_layers([Layer::Street])
            .with_tags([
                TagFilter::key("place").expect("valid"),
                TagFilter::key_value("highway", "residential").expect("valid"),
            ]);
        assert_eq!(query.layers(), &[Layer::City, Layer::Street]);
        let rendered: Vec<String> = query.tags().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["place", "highway:residential"]);
    }
}
