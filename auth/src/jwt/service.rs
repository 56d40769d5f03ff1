use chrono::DateTime;
use chrono::Utc;

use super::claims::AccessClaims;
use super::errors::InvalidToken;
use super::errors::JwtError;
use super::handler::JwtHandler;
use super::lifetime::TokenLifetime;
use crate::authorization::Role;

/// Issuer embedded in every token this service signs.
pub const TOKEN_ISSUER: &str = "carpool-api";

/// Audience embedded in every token this service signs.
pub const TOKEN_AUDIENCE: &str = "carpool-clients";

/// Settings needed to build a [`TokenService`].
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Lifetime expression, e.g. `24h`, `7d`, `30m`
    pub expires_in: String,
}

/// Identity and role carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub subject_id: String,
    pub role: String,
}

impl TokenIdentity {
    pub fn new(subject_id: impl ToString, role: impl ToString) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            role: role.to_string(),
        }
    }
}

/// Signs and verifies bearer tokens.
pub struct TokenService {
    handler: JwtHandler,
    lifetime: TokenLifetime,
}

impl TokenService {
    pub fn new(secret: &[u8], lifetime: TokenLifetime) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            lifetime,
        }
    }

    pub fn from_config(config: &TokenConfig) -> Self {
        Self::new(
            config.secret.as_bytes(),
            TokenLifetime::parse(&config.expires_in),
        )
    }

    /// Sign a token for `identity`, expiring after the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn sign(&self, identity: &TokenIdentity) -> Result<String, JwtError> {
        self.sign_at(identity, Utc::now())
    }

    fn sign_at(&self, identity: &TokenIdentity, now: DateTime<Utc>) -> Result<String, JwtError> {
        // A lifetime that runs past the representable calendar falls back to the default.
        let expires_at = now
            .checked_add_signed(self.lifetime.duration())
            .or_else(|| now.checked_add_signed(TokenLifetime::default().duration()))
            .ok_or_else(|| JwtError::EncodingFailed("token expiry out of range".to_string()))?;
        let claims = AccessClaims::new(&identity.subject_id, now, expires_at)
            .with_role(&identity.role)
            .with_issuer(TOKEN_ISSUER)
            .with_audience(TOKEN_AUDIENCE);

        self.handler.encode(&claims)
    }

    /// Verify a token and extract the identity it carries.
    ///
    /// A missing role claim defaults to `USER`. Issuer and audience are checked when
    /// present. Every rejection cause collapses into [`InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<TokenIdentity, InvalidToken> {
        let claims: AccessClaims = self.handler.decode(token).map_err(InvalidToken::new)?;

        check_claim("iss", claims.iss.as_deref(), TOKEN_ISSUER)?;
        check_claim("aud", claims.aud.as_deref(), TOKEN_AUDIENCE)?;

        Ok(TokenIdentity {
            subject_id: claims.sub,
            role: claims
                .role
                .unwrap_or_else(|| Role::User.as_str().to_string()),
        })
    }
}

fn check_claim(
    claim: &'static str,
    actual: Option<&str>,
    expected: &str,
) -> Result<(), InvalidToken> {
    match actual {
        Some(value) if value != expected => Err(InvalidToken::new(JwtError::UnexpectedClaim {
            claim,
            value: value.to_string(),
        })),
        _ => Ok(()),
    }
}
