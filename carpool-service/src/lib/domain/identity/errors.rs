use thiserror::Error;

/// Error for identifier parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for welcome notification delivery
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to reach notification provider: {0}")]
    ConnectionFailed(String),

    #[error("Notification provider rejected the message: {0}")]
    Rejected(String),
}
