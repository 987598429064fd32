//! Credential store: persistence for principals and their secret hashes

mod memory;
mod postgres;

use cinedex_common::RepositoryError;
use uuid::Uuid;

use crate::types::{CredentialRecord, NewCredential, Principal};

pub use memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;

/// Persistence boundary used by the guard (lookup by id) and by the
/// register/login handlers (lookup by email, create).
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a credential by (normalised) email, including its secret hash
    async fn find_by_email(&self, email: &str)
        -> Result<Option<CredentialRecord>, RepositoryError>;

    /// Find a principal by id, without its secret hash
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, RepositoryError>;

    /// Create a credential. Fails with `AlreadyExists` on a duplicate email.
    async fn create(&self, credential: NewCredential) -> Result<Principal, RepositoryError>;
}

/// Canonical form used for email uniqueness and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
