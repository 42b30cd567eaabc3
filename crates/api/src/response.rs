//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "message": ... }` acknowledgement for operations without a payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Access token returned by login and refresh. The refresh token travels
/// only in its cookie.
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}
