use thiserror::Error;

/// Error for Identity validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Email must not be empty")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("Password must not be empty")]
    Empty,
}

/// Errors raised by a credential store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialStoreError {
    /// The unique constraint on the identity rejected the insert.
    #[error("Identity already exists: {0}")]
    DuplicateIdentity(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for signup and signin
///
/// The `Display` text of the two client-facing kinds is what callers see; it
/// never says which check failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identity or wrong password on signin.
    #[error("Credentials incorrect")]
    CredentialsIncorrect,

    /// Identity already registered on signup.
    #[error("Credentials taken")]
    CredentialsTaken,

    /// A stored hash failed to parse; indicates store corruption.
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    /// The token signer is not configured.
    #[error("Token signing unavailable: {0}")]
    SigningUnavailable(String),

    /// Signing or encoding failed with a configured secret.
    #[error("Token issuance failed: {0}")]
    TokenIssuanceFailed(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Credential store error: {0}")]
    Store(String),
}

impl From<CredentialStoreError> for AuthError {
    fn from(err: CredentialStoreError) -> Self {
        match err {
            CredentialStoreError::DuplicateIdentity(_) => AuthError::CredentialsTaken,
            CredentialStoreError::Database(msg) => AuthError::Store(msg),
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::MalformedHash(msg) => AuthError::MalformedHash(msg),
            auth::PasswordError::HashingFailed(msg)
            | auth::PasswordError::InvalidParameters(msg) => AuthError::HashingFailed(msg),
        }
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::SigningUnavailable => AuthError::SigningUnavailable(err.to_string()),
            other => AuthError::TokenIssuanceFailed(other.to_string()),
        }
    }
}
