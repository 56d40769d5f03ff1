pub mod claims;
pub mod errors;
pub mod handler;
pub mod lifetime;
pub mod service;

pub use claims::AccessClaims;
pub use errors::InvalidToken;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use lifetime::TokenLifetime;
pub use service::TokenConfig;
pub use service::TokenIdentity;
pub use service::TokenService;
pub use service::TOKEN_AUDIENCE;
pub use service::TOKEN_ISSUER;
