use thiserror::Error;

/// Error type for token operations.
///
/// `Malformed` and `Expired` are kept apart for logging; HTTP callers
/// collapse them into one response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed or its signature is invalid: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,
}
