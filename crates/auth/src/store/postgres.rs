//! Postgres credential store
//!
//! Uses runtime `sqlx::query_as` (not macros) against the `users` table:
//! `id UUID PK, name TEXT, email TEXT UNIQUE, password_hash TEXT, role TEXT,
//! created_at TIMESTAMPTZ, updated_at TIMESTAMPTZ`.

use cinedex_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::{normalize_email, CredentialStore};
use crate::types::{CredentialRecord, NewCredential, Principal, Role};

/// Row type for user lookup (includes password_hash for verification)
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
}

impl UserRow {
    fn into_record(self) -> Result<CredentialRecord, RepositoryError> {
        let role: Role = self.role.parse().map_err(|e: String| {
            tracing::error!(user_id = %self.id, error = %e, "Corrupt role in users table");
            RepositoryError::InvalidData(e)
        })?;

        Ok(CredentialRecord {
            principal: Principal {
                id: self.id,
                name: self.name,
                email: self.email,
                role,
            },
            secret_hash: self.password_hash,
        })
    }
}

#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_record).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .map(UserRow::into_record)
            .transpose()?
            .map(|record| record.principal))
    }

    async fn create(&self, credential: NewCredential) -> Result<Principal, RepositoryError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, name, email, password_hash, role
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&credential.name)
        .bind(normalize_email(&credential.email))
        .bind(&credential.secret_hash)
        .bind(credential.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_insert)?;

        Ok(row.into_record()?.principal)
    }
}
