use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Lifetime of an access token when none is configured.
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 15;

/// Bearer token handed back to the caller after signup or signin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

/// Issues short-lived, HS256-signed access tokens.
///
/// Stateless: nothing about issued tokens is kept, so revocation is left to expiry.
pub struct TokenIssuer {
    handler: JwtHandler,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the default 15 minute lifetime.
    ///
    /// # Errors
    /// * `SigningUnavailable` - The secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Self::with_lifetime(secret, Duration::minutes(DEFAULT_TOKEN_LIFETIME_MINUTES))
    }

    /// Create an issuer with an explicit token lifetime.
    ///
    /// # Errors
    /// * `SigningUnavailable` - The secret is empty
    pub fn with_lifetime(secret: &[u8], lifetime: Duration) -> Result<Self, JwtError> {
        Ok(Self {
            handler: JwtHandler::new(secret)?,
            lifetime,
        })
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `subject` / `email`, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: impl ToString, email: &str) -> Result<AccessToken, JwtError> {
        self.issue_at(subject, email, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, JwtError> {
        let claims = Claims::for_identity(subject, email, issued_at, self.lifetime);
        let access_token = self.handler.encode(&claims)?;

        Ok(AccessToken { access_token })
    }

    /// Verify a token the way a relying party does.
    ///
    /// Accepts iff the signature checks out and the current time is before `exp`.
    ///
    /// # Errors
    /// * `TokenExpired` - Lifetime has elapsed
    /// * `InvalidToken` / `DecodingFailed` - Signature or format is wrong
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
