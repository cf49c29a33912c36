//! Error types for the shop API client.

use thiserror::Error;

/// Errors that can occur when calling the shop API.
///
/// Transport failures, server rejections, and undecodable responses are kept
/// distinct so the presentation layer can decide phrasing.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("rejected ({status}): {}", message.as_deref().unwrap_or("no error message"))]
    Rejected {
        /// HTTP status code of the rejection.
        status: reqwest::StatusCode,
        /// The `msg` field of the error body, when present.
        message: Option<String>,
    },

    /// Failed to decode a success response body.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The server-provided error text, when the server supplied one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Http(_) | Self::Decode(_) => None,
        }
    }
}

/// Error body returned by the shop API on rejected requests.
#[derive(Debug, serde::Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub msg: String,
}
