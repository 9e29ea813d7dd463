//! Error types for the Crossref client.

use serde::Deserialize;

/// Errors that can occur when talking to the Crossref API.
#[derive(Debug, thiserror::Error)]
pub enum CrossrefError {
    /// HTTP request failed before a response arrived (DNS, connection, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request and supplied a structured error message.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP failure whose body was not the expected JSON error envelope.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered 2xx but the body is not JSON.
    #[error("unexpected content type (HTTP {status}): {body}")]
    ContentType { status: u16, body: String },

    /// Failed to decode a JSON response body.
    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// A caller-supplied parameter failed a local precondition.
    ///
    /// Always raised before any network call is made.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl CrossrefError {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CrossrefError::Api { status, .. }
            | CrossrefError::Status { status, .. }
            | CrossrefError::ContentType { status, .. } => Some(*status),
            CrossrefError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn is_validation(&self) -> bool {
        matches!(self, CrossrefError::Validation(_))
    }
}

/// Convenience alias for Results using [`CrossrefError`].
pub type Result<T> = std::result::Result<T, CrossrefError>;

/// Error envelope sent by the API on 4xx/5xx.
///
/// Usually `{"message": [{"message": "..."}]}`, but some endpoints answer
/// with a plain string under `message`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub(crate) message: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiErrorMessage {
    Text(String),
    Items(Vec<ApiErrorItem>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorItem {
    #[serde(default)]
    pub(crate) message: Option<String>,
}

impl ApiErrorEnvelope {
    /// The human-readable message text, if the envelope carries one.
    pub(crate) fn text(&self) -> Option<&str> {
        match &self.message {
            ApiErrorMessage::Text(s) => Some(s),
            ApiErrorMessage::Items(items) => items.first().and_then(|i| i.message.as_deref()),
        }
    }
}
