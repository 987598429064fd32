//! Authentication configuration

use chrono::Duration;

use crate::password::BCRYPT_COST;

/// Default token lifetime in days
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Authentication configuration.
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub password_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
            password_cost: BCRYPT_COST,
        }
    }

    pub fn with_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn with_password_cost(mut self, password_cost: u32) -> Self {
        self.password_cost = password_cost;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    #[mutants::skip] // Redacting Debug output, no behaviour to assert on
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("password_cost", &self.password_cost)
            .finish()
    }
}
