//! Concrete authentication backend
//!
//! Wraps the credential store and the token issuer. Domain states expose it
//! to the extractors via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::TokenIssuer;
use crate::store::CredentialStore;

#[derive(Clone)]
pub struct AuthBackend {
    store: Arc<dyn CredentialStore>,
    issuer: TokenIssuer,
}

impl AuthBackend {
    pub fn new(store: Arc<dyn CredentialStore>, config: AuthConfig) -> Self {
        Self {
            store,
            issuer: TokenIssuer::new(config),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        self.issuer.config()
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Verify `token` and resolve its principal.
    ///
    /// Performs exactly one store lookup and no caching: a token stays valid
    /// until expiry even if the stored role changes in the meantime.
    pub(crate) async fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let verified = self.issuer.verify(token)?;

        let principal = self
            .store
            .find_by_id(verified.subject_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %verified.subject_id, "Failed to load user");
                AuthError::UserLoadError
            })?
            .ok_or_else(|| {
                tracing::debug!(user_id = %verified.subject_id, "Token subject no longer exists");
                AuthError::UserNotFound
            })?;

        Ok(AuthContext::new(principal))
    }
}
