use thiserror::Error;

/// Identifies which half of a tag filter failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    /// The OSM key, e.g. `highway`.
    Key,
    /// The OSM value, e.g. `residential`.
    Value,
}

impl TagField {
    /// Return the field name as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Value => "value",
        }
    }
}

impl std::fmt::Display for TagField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned when constructing a [`crate::TagFilter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagFilterError {
    /// The key or value is shorter than the minimum length.
    #[error("{field} '{text}' must be at least 3 characters long")]
    TooShort {
        /// Which part was too short.
        field: TagField,
        /// The offending text.
        text: String,
    },
    /// The key or value contains characters outside `[a-z0-9_:]`.
    #[error("{field} '{text}' may only contain lowercase letters, digits, '_' and ':'")]
    InvalidCharacters {
        /// Which part was malformed.
        field: TagField,
        /// The offending text.
        text: String,
    },
    /// The key is not part of the vocabulary.
    #[error("key '{key}' is not valid")]
    UnknownKey {
        /// The unknown key.
        key: String,
    },
    /// The value is not allowed for the given key.
    #[error("value '{value}' is not valid for the key '{key}'")]
    ValueNotAllowed {
        /// The key the value was checked against.
        key: String,
        /// The rejected value.
        value: String,
    },
    /// Neither a key nor a value was supplied.
    #[error("at least one of key or value must be provided")]
    MissingKeyAndValue,
}
