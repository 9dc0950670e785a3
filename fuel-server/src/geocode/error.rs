//! Geocoding error types.

/// Errors from the geocoding service.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error status code
    #[error("geocoder error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Nothing found for the query
    #[error("no geocoding match for {query:?}")]
    NoMatch { query: String },

    /// The service returned a coordinate outside the valid range
    #[error("geocoder returned an invalid coordinate: {message}")]
    InvalidCoordinate { message: String },
}

impl GeocodingError {
    /// Whether this error means "nothing found" rather than "service unavailable".
    pub fn is_no_match(&self) -> bool {
        matches!(self, GeocodingError::NoMatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodingError::NoMatch {
            query: "Nowhere".into(),
        };
        assert_eq!(err.to_string(), "no geocoding match for \"Nowhere\"");
        assert!(err.is_no_match());

        let err = GeocodingError::Api {
            status: 429,
            message: "slow down".into(),
        };
        assert_eq!(err.to_string(), "geocoder error 429: slow down");
        assert!(!err.is_no_match());
    }
}
