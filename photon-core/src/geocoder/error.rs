use thiserror::Error;

/// Errors from [`crate::geocoder::Geocoder::geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The query text was empty or whitespace only.
    ///
    /// The service rejects such requests, so they are refused before any
    /// network traffic.
    #[error("query text must not be blank")]
    EmptyQuery,

    /// The configured base URL could not be parsed.
    #[error("invalid geocoder URL {url:?}: {message}")]
    InvalidUrl {
        /// The rejected base URL.
        url: String,
        /// Why it was rejected.
        message: String,
    },

    /// The request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Transport error text.
        message: String,
    },

    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in whole seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("geocoder at {url} returned HTTP {status}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error text from the client.
        message: String,
    },

    /// The response body was not a valid result set.
    #[error("failed to parse geocoder response: {message}")]
    ParseError {
        /// Decoder error text.
        message: String,
    },
}
