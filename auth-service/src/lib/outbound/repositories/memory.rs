use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::credential::errors::CredentialStoreError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::Identity;
use crate::credential::ports::CredentialStore;

/// In-process CredentialStore.
///
/// The existence check and the insert happen under one lock, which gives the
/// same atomic unique-insert a database constraint does.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_identity: HashMap<Identity, Credential>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.by_identity.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> CredentialStoreError {
    CredentialStoreError::Database("credential store lock poisoned".to_string())
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_identity(
        &self,
        identity: &Identity,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        let inner = self.inner.lock().map_err(poisoned)?;
        Ok(inner.by_identity.get(identity).cloned())
    }

    async fn create(
        &self,
        identity: &Identity,
        password_hash: &str,
    ) -> Result<Credential, CredentialStoreError> {
        let mut guard = self.inner.lock().map_err(poisoned)?;
        let inner = &mut *guard;
        let id = CredentialId(inner.next_id + 1);

        match inner.by_identity.entry(identity.clone()) {
            Entry::Occupied(_) => Err(CredentialStoreError::DuplicateIdentity(
                identity.to_string(),
            )),
            Entry::Vacant(slot) => {
                let credential = Credential {
                    id,
                    identity: identity.clone(),
                    password_hash: password_hash.to_string(),
                    created_at: Utc::now(),
                };
                slot.insert(credential.clone());
                inner.next_id = id.0;
                Ok(credential)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn identity(email: &str) -> Identity {
        Identity::new(email.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryCredentialStore::new();

        let created = store.create(&identity("a@x.com"), "hash").await.unwrap();
        let found = store.find_by_identity(&identity("a@x.com")).await.unwrap();

        assert_eq!(created.id, CredentialId(1));
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = InMemoryCredentialStore::new();

        let found = store.find_by_identity(&identity("b@x.com")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = InMemoryCredentialStore::new();

        let first = store.create(&identity("a@x.com"), "h").await.unwrap();
        let second = store.create(&identity("b@x.com"), "h").await.unwrap();

        assert_eq!(first.id, CredentialId(1));
        assert_eq!(second.id, CredentialId(2));
    }

    #[tokio::test]
    async fn test_duplicate_identity() {
        let store = InMemoryCredentialStore::new();

        store.create(&identity("a@x.com"), "first").await.unwrap();
        let result = store.create(&identity("a@x.com"), "second").await;

        assert!(matches!(
            result,
            Err(CredentialStoreError::DuplicateIdentity(_))
        ));
        assert_eq!(store.len(), 1);

        let kept = store
            .find_by_identity(&identity("a@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.password_hash, "first");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_keep_one_record() {
        let store = Arc::new(InMemoryCredentialStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create(&identity("race@x.com"), &format!("hash-{}", i))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(CredentialStoreError::DuplicateIdentity(_)) => duplicates += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(store.len(), 1);
    }
}
