use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Per-field validation messages, keyed by field name.
pub type ValidationDetails = BTreeMap<String, Vec<String>>;

/// Closed set of failure kinds surfaced at the service boundary.
///
/// The boundary switches on [`ErrorKind::code`] only; messages are for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    UserAlreadyExists,
    UserNotFound,
    InvalidCredentials,
    Forbidden,
    Unauthorized,
    TokenInvalid,
    TokenExpired,
    TokenMalformed,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::UserAlreadyExists => "USER_ALREADY_EXISTS",
            ErrorKind::UserNotFound => "USER_NOT_FOUND",
            ErrorKind::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::TokenInvalid => "TOKEN_INVALID",
            ErrorKind::TokenExpired => "TOKEN_EXPIRED",
            ErrorKind::TokenMalformed => "TOKEN_MALFORMED",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error value shared by every use case: a kind plus a `{code, message}` payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    details: Option<ValidationDetails>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>, details: ValidationDetails) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn user_already_exists(email: &str) -> Self {
        Self::new(
            ErrorKind::UserAlreadyExists,
            format!("A user with email {:?} already exists", email),
        )
    }

    /// The one error returned for every failed login, whatever the cause.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid email or password")
    }

    pub fn user_not_found(identifier: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::UserNotFound,
            format!("User not found: {}", identifier),
        )
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn token_invalid() -> Self {
        Self::new(ErrorKind::TokenInvalid, "Invalid or expired token")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}
