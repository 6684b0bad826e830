//! Error type shared by every API call.

use thiserror::Error;

/// Errors surfaced by the access layer.
///
/// The layer performs no recovery and no translation: a non-2xx response
/// becomes [`ApiError::Status`] carrying the status code and the raw body
/// exactly as the server sent it, and failures that never produced a
/// response carry no status at all.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// No response was received: connection, DNS or protocol failure.
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response body did not decode into the expected shape.
    #[error("response decoding failed: {0}")]
    Decode(#[source] reqwest::Error),

    /// The request payload could not be assembled.
    #[error("invalid request payload: {0}")]
    Payload(String),
}

impl ApiError {
    /// Status code of the server response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
