//! Error types for wallet service calls
//!
//! Every remote call made by the orchestrator fails in one of three ways:
//! the service could not be reached, it answered with a non-success status,
//! or it answered with JSON that does not match the expected response.

use thiserror::Error;

/// Failure of a single call against the remote wallet service
///
/// The `Display` output is the message surfaced to the user through the
/// process-wide error slot. For HTTP failures that is the raw response body,
/// since the backend reports its diagnostics as plain text.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, reset)
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("{body}")]
    Http { status: u16, body: String },

    /// The response was valid JSON but not the expected shape
    #[error("Unexpected response from wallet service: {0}")]
    Shape(String),
}

impl ApiError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an HTTP error from a status code and the raw response text
    ///
    /// Trailing whitespace is trimmed from the body. An empty body falls back
    /// to the status line so the error slot never ends up blank.
    pub fn http(status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim_end();
        let body = if body.is_empty() {
            match status.canonical_reason() {
                Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
                None => format!("HTTP {}", status.as_u16()),
            }
        } else {
            body.to_string()
        };

        Self::Http {
            status: status.as_u16(),
            body,
        }
    }

    /// Create a shape error
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// HTTP status of the failed call, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
