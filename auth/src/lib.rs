//! Identity and access primitives for the carpooling platform.
//!
//! - Password hashing (Argon2id, PHC string format)
//! - Bearer tokens (HS256 JWT carrying identity, role and expiry)
//! - Hierarchical role authorization (USER < DRIVER < ADMIN)
//!
//! Everything here is synchronous and free of I/O. Services decide where to run the
//! expensive hashing calls and how to surface failures.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let hash = hasher.hash("Password1").unwrap();
//! assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
//! assert!(hasher.verify("Password1", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIdentity, TokenLifetime, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", TokenLifetime::parse("7d"));
//! let token = tokens.sign(&TokenIdentity::new("u1", "ADMIN")).unwrap();
//! let identity = tokens.verify(&token).unwrap();
//! assert_eq!(identity.role, "ADMIN");
//! ```
//!
//! ## Authorization
//! ```
//! use auth::authorization::{admit, Role};
//!
//! assert!(admit("ADMIN", &[Role::Driver]));
//! assert!(!admit("USER", &[Role::Driver]));
//! ```

pub mod authorization;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authorization::Role;
pub use authorization::RoleRequirement;
pub use jwt::InvalidToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenConfig;
pub use jwt::TokenIdentity;
pub use jwt::TokenLifetime;
pub use jwt::TokenService;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
