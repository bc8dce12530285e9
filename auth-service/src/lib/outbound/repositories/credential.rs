use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::credential::errors::CredentialStoreError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::Identity;
use crate::credential::ports::CredentialStore;

/// Unique constraint on `credentials.email`, created by the initial migration.
const EMAIL_UNIQUE_CONSTRAINT: &str = "credentials_email_key";

/// PostgreSQL implementation of CredentialStore.
///
/// Uniqueness is enforced by the `credentials_email_key` constraint, so two
/// racing inserts for the same email resolve inside the database.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    /// Create a new PostgreSQL credential store.
    ///
    /// # Arguments
    /// * `pool` - PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_credential(row: &PgRow) -> Result<Credential, CredentialStoreError> {
        let id: i64 = row.try_get("id").map_err(database_error)?;
        let email: String = row.try_get("email").map_err(database_error)?;
        let password_hash: String = row.try_get("password_hash").map_err(database_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(database_error)?;

        let identity = Identity::new(email).map_err(|e| {
            CredentialStoreError::Database(format!("Stored email is invalid: {}", e))
        })?;

        Ok(Credential {
            id: CredentialId(id),
            identity,
            password_hash,
            created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> CredentialStoreError {
    CredentialStoreError::Database(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_identity(
        &self,
        identity: &Identity,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(identity.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_credential).transpose()
    }

    async fn create(
        &self,
        identity: &Identity,
        password_hash: &str,
    ) -> Result<Credential, CredentialStoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO credentials (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(identity.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return CredentialStoreError::DuplicateIdentity(identity.to_string());
                }
            }
            database_error(e)
        })?;

        let credential = Self::row_to_credential(&row)?;
        tracing::debug!(credential_id = %credential.id, "Credential inserted");

        Ok(credential)
    }
}
