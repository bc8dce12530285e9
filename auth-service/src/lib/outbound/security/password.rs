use async_trait::async_trait;
use auth::Argon2Hasher;

use crate::credential::errors::AuthError;
use crate::credential::ports::PasswordHashing;

/// Argon2 work is CPU-bound, so both operations run on the blocking pool and
/// never stall the async workers serving other requests.
#[async_trait]
impl PasswordHashing for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || Argon2Hasher::hash(&hasher, &password))
            .await
            .map_err(|e| AuthError::HashingFailed(format!("Hashing task failed: {}", e)))?
            .map_err(AuthError::from)
    }

    async fn verify(&self, hash: &str, password: &str) -> Result<bool, AuthError> {
        let hasher = self.clone();
        let hash = hash.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || Argon2Hasher::verify(&hasher, &hash, &password))
            .await
            .map_err(|e| AuthError::HashingFailed(format!("Verification task failed: {}", e)))?
            .map_err(AuthError::from)
    }
}
