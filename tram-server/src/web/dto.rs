//! Response bodies of the web layer that are not webhook responses.

use serde::Serialize;

/// Liveness body for `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub api: &'static str,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
