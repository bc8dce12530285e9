use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::credential::errors::IdentityError;
use crate::credential::errors::PasswordInputError;

/// Stored credential record.
///
/// Created once by the store on signup; the service never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: CredentialId,
    pub identity: Identity,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Store-assigned credential identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CredentialId(pub i64);

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique, email-shaped account key.
///
/// Validated with an RFC 5322 parser. Compared byte for byte; no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Create a validated identity.
    ///
    /// # Errors
    /// * `Empty` - The string is empty
    /// * `InvalidFormat` - The string is not an email address
    pub fn new(email: String) -> Result<Self, IdentityError> {
        if email.is_empty() {
            return Err(IdentityError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| Identity(email))
            .map_err(|e| IdentityError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty plaintext password.
///
/// `Debug` is redacted so the value never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - The password is empty
    pub fn new(password: String) -> Result<Self, PasswordInputError> {
        if password.is_empty() {
            return Err(PasswordInputError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Command to register a new identity
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub identity: Identity,
    pub password: Password,
}

impl SignupCommand {
    pub fn new(identity: Identity, password: Password) -> Self {
        Self { identity, password }
    }
}

/// Command to authenticate a returning identity
#[derive(Debug, Clone)]
pub struct SigninCommand {
    pub identity: Identity,
    pub password: Password,
}

impl SigninCommand {
    pub fn new(identity: Identity, password: Password) -> Self {
        Self { identity, password }
    }
}
