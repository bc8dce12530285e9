use async_trait::async_trait;
use auth::AccessToken;

use crate::credential::errors::AuthError;
use crate::credential::errors::CredentialStoreError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::Identity;
use crate::credential::models::SigninCommand;
use crate::credential::models::SignupCommand;

/// Port for the authentication flows exposed to the transport layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated identity and plaintext password
    ///
    /// # Returns
    /// Access token for the new credential
    ///
    /// # Errors
    /// * `CredentialsTaken` - Identity is already registered
    /// * `HashingFailed` - Password could not be hashed
    /// * `SigningUnavailable` - Signing secret is not configured
    /// * `TokenIssuanceFailed` - Token could not be signed
    /// * `Store` - Credential store failed
    async fn signup(&self, command: SignupCommand) -> Result<AccessToken, AuthError>;

    /// Authenticate an identity and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated identity and plaintext password
    ///
    /// # Returns
    /// Access token for the existing credential
    ///
    /// # Errors
    /// * `CredentialsIncorrect` - Unknown identity or wrong password
    /// * `MalformedHash` - Stored hash could not be parsed
    /// * `SigningUnavailable` - Signing secret is not configured
    /// * `TokenIssuanceFailed` - Token could not be signed
    /// * `Store` - Credential store failed
    async fn signin(&self, command: SigninCommand) -> Result<AccessToken, AuthError>;
}

/// Persistence of credential records.
///
/// Implementations must make `create` an atomic check-and-insert: of two racing
/// creates for the same identity exactly one succeeds.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve the credential for an identity.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_identity(
        &self,
        identity: &Identity,
    ) -> Result<Option<Credential>, CredentialStoreError>;

    /// Persist a new credential and assign its id.
    ///
    /// # Returns
    /// Created credential
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Identity already exists
    /// * `Database` - Store operation failed
    async fn create(
        &self,
        identity: &Identity,
        password_hash: &str,
    ) -> Result<Credential, CredentialStoreError>;
}

/// One-way password hashing with embedded parameters.
#[async_trait]
pub trait PasswordHashing: Send + Sync + 'static {
    /// Hash a plaintext password with a fresh salt.
    async fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// `Ok(false)` on mismatch, `MalformedHash` if `hash` does not parse.
    async fn verify(&self, hash: &str, password: &str) -> Result<bool, AuthError>;
}

/// Signed access token issuance.
pub trait TokenIssuing: Send + Sync + 'static {
    fn issue(&self, subject: CredentialId, identity: &Identity) -> Result<AccessToken, AuthError>;
}
