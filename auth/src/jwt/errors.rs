use thiserror::Error;

/// Error type for JWT operations.
///
/// Variants stay distinct so rejections can be logged precisely; callers of
/// [`TokenService::verify`](super::TokenService::verify) only ever see [`InvalidToken`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token uses an unexpected signing algorithm")]
    UnexpectedAlgorithm,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Unexpected {claim} claim: {value}")]
    UnexpectedClaim { claim: &'static str, value: String },
}

/// The single failure signal returned when a bearer token cannot be trusted.
///
/// The underlying cause is kept for logging via [`InvalidToken::reason`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid or expired token")]
pub struct InvalidToken(#[source] JwtError);

impl InvalidToken {
    pub(crate) fn new(reason: JwtError) -> Self {
        Self(reason)
    }

    /// Why the token was rejected.
    pub fn reason(&self) -> &JwtError {
        &self.0
    }
}
