//! The validated [`TagFilter`] value object.

use std::fmt;
use std::str::FromStr;

use super::error::{TagField, TagFilterError};
use super::vocabulary::Vocabulary;
use crate::compare::TryCompare;

/// Minimum length of a key or value.
const MIN_LEN: usize = 3;

/// A key/value/negation constraint on OpenStreetMap tags.
///
/// Filters are validated when built and immutable afterwards. Equality,
/// hashing and ordering follow the `(key, value, negate)` tuple.
///
/// # Examples
///
/// ```
/// use photon_core::{TagFilter, TagFilterError};
///
/// let filter = TagFilter::new(Some("highway"), Some("residential"), true)?;
/// assert_eq!(filter.to_string(), "!highway:residential");
///
/// let err = TagFilter::key_value("highway", "castle").unwrap_err();
/// assert!(matches!(err, TagFilterError::ValueNotAllowed { .. }));
/// # Ok::<(), TagFilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagFilter {
    key: Option<String>,
    value: Option<String>,
    negate: bool,
}

impl TagFilter {
    /// Validate and construct a filter against the builtin vocabulary.
    ///
    /// # Errors
    ///
    /// Returns a [`TagFilterError`] when either part is malformed, the key is
    /// unknown, the value is not allowed for the key, or both parts are
    /// missing.
    pub fn new(
        key: Option<&str>,
        value: Option<&str>,
        negate: bool,
    ) -> Result<Self, TagFilterError> {
        Self::with_vocabulary(Vocabulary::builtin(), key, value, negate)
    }

    /// Validate and construct a filter against `vocabulary`.
    ///
    /// # Errors
    ///
    /// See [`TagFilter::new`].
    pub fn with_vocabulary(
        vocabulary: &Vocabulary,
        key: Option<&str>,
        value: Option<&str>,
        negate: bool,
    ) -> Result<Self, TagFilterError> {
        if let Some(key) = key {
            check_syntax(TagField::Key, key)?;
            if !vocabulary.is_known_key(key) {
                return Err(TagFilterError::UnknownKey {
                    key: key.to_owned(),
                });
            }
        }
        if let Some(value) = value {
            check_syntax(TagField::Value, value)?;
        }
        if let (Some(key), Some(value)) = (key, value)
            && !vocabulary.is_allowed_value(key, value)
        {
            return Err(TagFilterError::ValueNotAllowed {
                key: key.to_owned(),
                value: value.to_owned(),
            });
        }
        if key.is_none() && value.is_none() {
            return Err(TagFilterError::MissingKeyAndValue);
        }
        Ok(Self {
            key: key.map(str::to_owned),
            value: value.map(str::to_owned),
            negate,
        })
    }

    /// Filter on features carrying `key` with any value.
    ///
    /// # Errors
    ///
    /// See [`TagFilter::new`].
    pub fn key(key: &str) -> Result<Self, TagFilterError> {
        Self::new(Some(key), None, false)
    }

    /// Filter on features carrying `value` under any key.
    ///
    /// # Errors
    ///
    /// See [`TagFilter::new`].
    pub fn value(value: &str) -> Result<Self, TagFilterError> {
        Self::new(None, Some(value), false)
    }

    /// Filter on features tagged exactly `key=value`.
    ///
    /// # Errors
    ///
    /// See [`TagFilter::new`].
    pub fn key_value(key: &str, value: &str) -> Result<Self, TagFilterError> {
        Self::new(Some(key), Some(value), false)
    }

    /// Return a copy of this filter that excludes matching features.
    #[must_use]
    pub fn negated(self) -> Self {
        Self {
            negate: true,
            ..self
        }
    }

    /// The OSM key, if any.
    #[must_use]
    pub fn key_part(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The OSM value, if any.
    #[must_use]
    pub fn value_part(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether matching features are excluded rather than required.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negate
    }

    /// Parse the textual filter syntax against `vocabulary`.
    ///
    /// A leading `!` negates the filter and a leading `:` marks a value-only
    /// filter. Otherwise the longest known key that is the whole text or a
    /// `:`-delimited prefix of it becomes the key and the rest the value.
    ///
    /// # Errors
    ///
    /// See [`TagFilter::new`]; text without a known key prefix is rejected as
    /// an unknown key.
    pub fn parse_with_vocabulary(vocabulary: &Vocabulary, text: &str) -> Result<Self, TagFilterError> {
        let (negate, body) = match text.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if let Some(value) = body.strip_prefix(':') {
            return Self::with_vocabulary(vocabulary, None, Some(value), negate);
        }
        if vocabulary.is_known_key(body) {
            return Self::with_vocabulary(vocabulary, Some(body), None, negate);
        }
        let split = body
            .rmatch_indices(':')
            .filter_map(|(index, _)| body.split_at_checked(index))
            .find(|(key, _)| vocabulary.is_known_key(key));
        match split {
            Some((key, rest)) => {
                let value = rest.strip_prefix(':').unwrap_or(rest);
                Self::with_vocabulary(vocabulary, Some(key), Some(value), negate)
            }
            None => Self::with_vocabulary(vocabulary, Some(body), None, negate),
        }
    }
}

fn check_syntax(field: TagField, text: &str) -> Result<(), TagFilterError> {
    if !text
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == ':')
    {
        return Err(TagFilterError::InvalidCharacters {
            field,
            text: text.to_owned(),
        });
    }
    if text.len() < MIN_LEN {
        return Err(TagFilterError::TooShort {
            field,
            text: text.to_owned(),
        });
    }
    Ok(())
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            f.write_str("!")?;
        }
        let parts: Vec<&str> = [self.key.as_deref(), self.value.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        f.write_str(&parts.join(":"))
    }
}

impl FromStr for TagFilter {
    type Err = TagFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_vocabulary(Vocabulary::builtin(), s)
    }
}

impl TryCompare for TagFilter {}
