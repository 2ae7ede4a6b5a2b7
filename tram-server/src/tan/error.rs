//! TAN client error types.

/// Errors from a transit backend.
#[derive(Debug, thiserror::Error)]
pub enum TanError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Mock fixture directory could not be loaded
    #[error("mock data error: {0}")]
    Mock(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TanError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = TanError::Json {
            message: "expected a sequence".into(),
            body: Some("{}".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected a sequence");

        let err = TanError::Mock("no stations.json".into());
        assert_eq!(err.to_string(), "mock data error: no stations.json");
    }
}
