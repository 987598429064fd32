//! In-memory credential store
//!
//! Used when no database is configured and by the test suites.

use std::collections::HashMap;

use cinedex_common::RepositoryError;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{normalize_email, CredentialStore};
use crate::types::{CredentialRecord, NewCredential, Principal};

#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<Uuid, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a principal (simulates deletion after a token was issued)
    pub async fn remove(&self, id: Uuid) -> bool {
        self.records.write().await.remove(&id).is_some()
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let email = normalize_email(email);
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.principal.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.get(&id).map(|r| r.principal.clone()))
    }

    async fn create(&self, credential: NewCredential) -> Result<Principal, RepositoryError> {
        let email = normalize_email(&credential.email);
        let mut records = self.records.write().await;

        // Uniqueness is checked under the write lock
        if records.values().any(|r| r.principal.email == email) {
            return Err(RepositoryError::AlreadyExists);
        }

        let principal = Principal {
            id: Uuid::new_v4(),
            name: credential.name,
            email,
            role: credential.role,
        };
        records.insert(
            principal.id,
            CredentialRecord {
                principal: principal.clone(),
                secret_hash: credential.secret_hash,
            },
        );

        Ok(principal)
    }
}
