//! Error type shared by every API call

use thiserror::Error;

/// Message used when a failed response carries no `message` field
pub const FALLBACK_MESSAGE: &str = "API request failed";

/// StreamHub API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, refused connection, TLS...)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Success status, but the body was not the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The request could not be built (bad header, non-scalar query value)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The token store could not be read or written
    #[error("Token storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Build an HTTP failure from a status and an already-parsed body
    pub fn from_body(status: u16, body: Option<&serde_json::Value>) -> Self {
        let message = body
            .and_then(|b| b.get("message"))
            .and_then(|m| m.as_str())
            .unwrap_or(FALLBACK_MESSAGE)
            .to_string();
        ApiError::Http { status, message }
    }

    /// True for the "request failed" kind: server rejections and transport failures
    pub fn is_request_failure(&self) -> bool {
        matches!(self, ApiError::Http { .. } | ApiError::Transport(_))
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
