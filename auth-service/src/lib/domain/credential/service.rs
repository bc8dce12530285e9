use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessToken;
use tokio::sync::OnceCell;

use crate::credential::errors::AuthError;
use crate::credential::errors::CredentialStoreError;
use crate::credential::models::SigninCommand;
use crate::credential::models::SignupCommand;
use crate::credential::ports::AuthServicePort;
use crate::credential::ports::CredentialStore;
use crate::credential::ports::PasswordHashing;
use crate::credential::ports::TokenIssuing;

/// Plaintext hashed once to give unknown identities something to verify against.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-identities";

/// Domain service implementing signup and signin.
///
/// Collaborators are passed in explicitly and shared behind `Arc`; the service
/// itself keeps no per-request state.
pub struct AuthService<CS, PH, TI>
where
    CS: CredentialStore,
    PH: PasswordHashing,
    TI: TokenIssuing,
{
    store: Arc<CS>,
    hasher: Arc<PH>,
    issuer: Arc<TI>,
    dummy_hash: OnceCell<String>,
}

impl<CS, PH, TI> AuthService<CS, PH, TI>
where
    CS: CredentialStore,
    PH: PasswordHashing,
    TI: TokenIssuing,
{
    /// Create a new auth service.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `hasher` - Password hashing implementation
    /// * `issuer` - Token issuing implementation
    pub fn new(store: Arc<CS>, hasher: Arc<PH>, issuer: Arc<TI>) -> Self {
        Self {
            store,
            hasher,
            issuer,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Burn one verification so a missing identity costs what a wrong password does.
    async fn verify_against_dummy(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
            .await;

        match dummy {
            Ok(hash) => {
                let _ = self.hasher.verify(hash, password).await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to prepare dummy password hash"),
        }
    }
}

#[async_trait]
impl<CS, PH, TI> AuthServicePort for AuthService<CS, PH, TI>
where
    CS: CredentialStore,
    PH: PasswordHashing,
    TI: TokenIssuing,
{
    async fn signup(&self, command: SignupCommand) -> Result<AccessToken, AuthError> {
        let password_hash = self.hasher.hash(command.password.expose()).await?;

        let credential = self
            .store
            .create(&command.identity, &password_hash)
            .await
            .map_err(|e| match e {
                CredentialStoreError::DuplicateIdentity(_) => {
                    tracing::warn!("Signup rejected: identity already registered");
                    AuthError::CredentialsTaken
                }
                other => {
                    tracing::error!(error = %other, "Credential store failed during signup");
                    AuthError::from(other)
                }
            })?;

        let token = self.issuer.issue(credential.id, &credential.identity)?;
        tracing::info!(credential_id = %credential.id, "Signup succeeded");

        Ok(token)
    }

    async fn signin(&self, command: SigninCommand) -> Result<AccessToken, AuthError> {
        let password = command.password.expose();

        let credential = self
            .store
            .find_by_identity(&command.identity)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Credential store failed during signin");
                AuthError::from(e)
            })?;

        let Some(credential) = credential else {
            self.verify_against_dummy(password).await;
            tracing::warn!("Signin rejected");
            return Err(AuthError::CredentialsIncorrect);
        };

        let is_valid = self
            .hasher
            .verify(&credential.password_hash, password)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    credential_id = %credential.id,
                    error = %e,
                    "Stored credential could not be verified"
                );
            })?;

        if !is_valid {
            tracing::warn!("Signin rejected");
            return Err(AuthError::CredentialsIncorrect);
        }

        let token = self.issuer.issue(credential.id, &credential.identity)?;
        tracing::info!(credential_id = %credential.id, "Signin succeeded");

        Ok(token)
    }
}
