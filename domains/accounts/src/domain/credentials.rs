//! Registration and login
//!
//! Both flows end in a [`Session`]: the stored principal plus a freshly
//! issued bearer token. bcrypt runs on the blocking pool.

use cinedex_auth::{
    password::{hash_password, verify_password, verify_without_hash},
    AuthBackend, NewCredential, Principal, Role, Token,
};
use cinedex_common::{Error, RepositoryError, Result};

const DUPLICATE_MESSAGE: &str = "User already exists";
const BAD_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Validated registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Principal together with the token issued for it
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub token: Token,
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Internal(format!("blocking task failed: {e}")))
}

fn issue(backend: &AuthBackend, principal: Principal) -> Result<Session> {
    let token = backend
        .issuer()
        .issue(principal.id, principal.role)
        .map_err(|e| Error::Internal(format!("token issuance failed: {e}")))?;

    Ok(Session { principal, token })
}

/// Create a principal and sign it in.
///
/// A duplicate email is a `Conflict` whether it is caught by the lookup or
/// by the store's uniqueness check on a concurrent insert.
pub async fn register(backend: &AuthBackend, registration: Registration) -> Result<Session> {
    let store = backend.store();

    if store.find_by_email(&registration.email).await?.is_some() {
        return Err(Error::Conflict(DUPLICATE_MESSAGE.to_string()));
    }

    let cost = backend.config().password_cost;
    let password = registration.password;
    let secret_hash = run_blocking(move || hash_password(&password, cost)).await??;

    let principal = store
        .create(NewCredential {
            name: registration.name.trim().to_string(),
            email: registration.email,
            secret_hash,
            role: registration.role,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => Error::Conflict(DUPLICATE_MESSAGE.to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id = %principal.id, role = %principal.role, "User registered");

    issue(backend, principal)
}

/// Check an email/password pair and sign the principal in.
///
/// Unknown email and wrong password fail identically, including the bcrypt
/// work spent before answering.
pub async fn login(backend: &AuthBackend, email: &str, password: &str) -> Result<Session> {
    let Some(record) = backend.store().find_by_email(email).await? else {
        let cost = backend.config().password_cost;
        let password = password.to_string();
        run_blocking(move || verify_without_hash(&password, cost)).await?;

        tracing::debug!("Login rejected: unknown email");
        return Err(Error::Authentication(BAD_CREDENTIALS_MESSAGE.to_string()));
    };

    let password = password.to_string();
    let secret_hash = record.secret_hash.clone();
    let verified = run_blocking(move || verify_password(&password, &secret_hash)).await?;

    if !verified {
        tracing::debug!(user_id = %record.principal.id, "Login rejected: wrong password");
        return Err(Error::Authentication(BAD_CREDENTIALS_MESSAGE.to_string()));
    }

    issue(backend, record.principal)
}
