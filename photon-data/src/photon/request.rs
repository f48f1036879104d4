//! Render geocode queries as Photon search URLs.

use photon_core::{GeocodeError, GeocodeQuery};
use url::Url;

/// Build the search URL for `query` against the `/api` endpoint at
/// `base_url`.
///
/// Parameters are `q` and `limit`, then one `osm_tag` per tag filter and one
/// `layer` per layer, all form-encoded. A trailing slash on `base_url` is
/// ignored.
///
/// # Errors
///
/// Returns [`GeocodeError::InvalidUrl`] when `base_url` is not an absolute
/// `http` or `https` URL.
///
/// # Examples
///
/// ```
/// use photon_core::{GeocodeQuery, Layer, TagFilter};
/// use photon_data::photon::search_url;
///
/// let query = GeocodeQuery::new("Berlin")
///     .with_tag(TagFilter::key("place")?)
///     .with_layer(Layer::City);
/// let url = search_url("http://localhost:2322/api", &query)?;
/// assert_eq!(
///     url.as_str(),
///     "http://localhost:2322/api?q=Berlin&limit=10&osm_tag=place&layer=city"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn search_url(base_url: &str, query: &GeocodeQuery) -> Result<Url, GeocodeError> {
    let invalid = |message: String| GeocodeError::InvalidUrl {
        url: base_url.to_owned(),
        message,
    };
    let mut url = Url::parse(base_url.trim_end_matches('/')).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    url.query_pairs_mut()
        .clear()
        .append_pair("q", query.text())
        .append_pair("limit", &query.limit().to_string());
    for tag in query.tags() {
        url.query_pairs_mut().append_pair("osm_tag", &tag.to_string());
    }
    for layer in query.layers() {
        url.query_pairs_mut().append_pair("layer", layer.as_str());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photon_core::{Layer, TagFilter};
    use rstest::rstest;
    use std::num::NonZeroU32;

    #[rstest]
    fn renders_query_limit_tags_and_layers() {
        let query = GeocodeQuery::new("66663 Merzig Am Stadtwald 5")
            .with_limit(NonZeroU32::new(5).expect("non-zero"))
            .with_tags([
                TagFilter::key_value("highway", "residential")
                    .expect("valid")
                    .negated(),
                TagFilter::key("building").expect("valid"),
            ])
            .with_layers([Layer::Street, Layer::House]);

        let url = search_url("http://localhost:2322/api", &query).expect("valid url");

        assert_eq!(
            url.as_str(),
            "http://localhost:2322/api?q=66663+Merzig+Am+Stadtwald+5&limit=5\
             &osm_tag=%21highway%3Aresidential&osm_tag=building&layer=street&layer=house"
        );
    }

    #[rstest]
    fn strips_trailing_slash() {
        let url = search_url("http://photon.example.com/api/", &GeocodeQuery::new("Berlin"))
            .expect("valid url");

        assert!(url.as_str().starts_with("http://photon.example.com/api?"));
    }

    #[rstest]
    fn encodes_non_ascii_query_text() {
        let url = search_url("http://localhost:2322/api", &GeocodeQuery::new("Höhr-Grenzhausen"))
            .expect("valid url");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_owned(), "Höhr-Grenzhausen".to_owned()));
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://photon.example.com/api")]
    #[case("")]
    fn rejects_invalid_base_urls(#[case] base_url: &str) {
        let err = search_url(base_url, &GeocodeQuery::new("Berlin")).expect_err("should fail");

        assert!(matches!(err, GeocodeError::InvalidUrl { .. }));
    }
}
