use thiserror::Error;

use crate::FETCH_FAILED_MESSAGE;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid server URL: {0}")]
    InvalidEndpoint(String),

    #[error("image service unreachable: {0}")]
    Unreachable(String),

    #[error("image request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response from image service: {0}")]
    InvalidResponse(String),
}

impl LookupError {
    /// The text shown to the user. Every failure reads the same.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}
