use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

/// Error for legacy PBKDF2 hash strings that cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LegacyHashError {
    #[error("Expected 4 '$'-separated segments, got {0}")]
    MissingSegments(usize),

    #[error("Unknown algorithm tag: {0}")]
    UnknownAlgorithm(String),

    #[error("Iteration count must be a positive integer")]
    InvalidIterations,

    #[error("Salt must not contain '$'")]
    InvalidSalt,

    #[error("Digest is not valid base64")]
    InvalidDigest,

    #[error("Digest is empty")]
    EmptyDigest,
}

impl From<LegacyHashError> for PasswordError {
    fn from(err: LegacyHashError) -> Self {
        PasswordError::MalformedHash(err.to_string())
    }
}
