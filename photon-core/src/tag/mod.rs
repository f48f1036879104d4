//! OpenStreetMap tag filters used to narrow geocoding queries.
//!
//! A [`TagFilter`] restricts results to features carrying (or, when negated,
//! lacking) a given OSM key, value or key/value pair. Filters are checked
//! against a [`Vocabulary`] of allowed keys and values when they are built, so
//! an invalid filter never reaches the request builder.
//!
//! # Examples
//!
//! ```
//! use photon_core::TagFilter;
//!
//! let filter = TagFilter::key_value("highway", "residential")?;
//! assert_eq!(filter.to_string(), "highway:residential");
//!
//! let excluded = TagFilter::key("building")?.negated();
//! assert_eq!(excluded.to_string(), "!building");
//! # Ok::<(), photon_core::TagFilterError>(())
//! ```

mod error;
mod filter;
mod vocabulary;

pub use error::{TagField, TagFilterError};
pub use filter::TagFilter;
pub use vocabulary::Vocabulary;

#[cfg(feature = "serde")]
pub use vocabulary::VocabularyError;
