//! Fuel price API error types.

/// Errors from the station data source.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The configured base URL is unusable
    #[error("invalid base URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DataSourceError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = DataSourceError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = DataSourceError::Fixture {
            message: "missing regions.json".into(),
        };
        assert!(err.to_string().contains("regions.json"));
    }
}
