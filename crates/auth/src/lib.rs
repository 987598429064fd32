//! Authentication and authorization for Cinedex
//!
//! Provides bearer token issuing/verification, the credential store
//! boundary, the role gate, and axum extractors that work with any domain
//! state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod gate;
mod jwt;
pub mod password;
pub mod store;
mod types;

pub use backend::AuthBackend;
pub use claims::TokenClaims;
pub use config::{AuthConfig, DEFAULT_TOKEN_TTL_DAYS};
pub use context::AuthContext;
pub use error::{AuthError, TokenError};
pub use extractors::{AdminUser, AuthUser};
pub use gate::authorize;
pub use jwt::{Token, TokenIssuer, VerifiedToken};
pub use store::{CredentialStore, InMemoryCredentialStore, PgCredentialStore};
pub use types::{CredentialRecord, NewCredential, Principal, Role};
