//! Admin API error types.

use serde::Deserialize;
use thiserror::Error;

/// Prefix of the message Caddy returns for an `@id` it does not know.
pub const UNKNOWN_OBJECT_ID: &str = "unknown object ID";

/// Errors that can occur while talking to the admin API.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Connection, request or body read failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server has no object with this `@id`.
    #[error("not found ID '{id}'")]
    NotFound { id: String },

    /// The server answered with an error message.
    #[error("admin API rejected request: {0}")]
    Rejected(String),

    /// A route could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The admin base URL could not be parsed.
    #[error("invalid admin URL '{0}'")]
    InvalidUrl(String),
}

impl AdminError {
    /// True for the expected "no such object" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminError::NotFound { .. })
    }
}

/// Result type for admin API operations.
pub type AdminResult<T> = Result<T, AdminError>;

/// Body shape of an admin API error response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    /// Parses `body` as an error payload, if it is one.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body.trim_end()).ok()
    }

    pub fn is_unknown_id(&self) -> bool {
        self.error.starts_with(UNKNOWN_OBJECT_ID)
    }
}
