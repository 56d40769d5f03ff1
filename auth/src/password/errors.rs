use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParameters(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored digest could not be parsed back into its segments.
    #[error("Invalid password hash format: {0}")]
    InvalidFormat(String),
}
