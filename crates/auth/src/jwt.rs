//! Token issuing/verification and bearer extraction helpers

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::claims::TokenClaims;
use crate::config::AuthConfig;
use crate::error::{AuthError, TokenError};
use crate::types::Role;

/// A freshly signed bearer token
#[derive(Debug, Clone)]
pub struct Token {
    pub value: String,
    pub subject_id: Uuid,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Identity recovered from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject_id: Uuid,
    pub role: Role,
    pub expires_at: i64,
}

/// Signs and verifies self-contained HS256 bearer tokens.
///
/// Holds only read-only configuration; validity is decided by signature
/// and expiry alone.
#[derive(Clone)]
pub struct TokenIssuer {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Issue a token for `subject_id` valid for the configured TTL
    pub fn issue(&self, subject_id: Uuid, role: Role) -> Result<Token, TokenError> {
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(self.config.token_ttl)
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_string()))?;

        let claims = TokenClaims {
            sub: subject_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(Token {
            value,
            subject_id,
            role,
            issued_at,
            expires_at,
        })
    }

    /// Verify signature and expiry, returning the embedded identity
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidToken
                    | ErrorKind::Base64(_)
                    | ErrorKind::Json(_)
                    | ErrorKind::Utf8(_)
                    | ErrorKind::MissingRequiredClaim(_) => TokenError::Malformed,
                    _ => TokenError::Invalid,
                }
            })?;

        let claims = token_data.claims;
        let subject_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)?;

        Ok(VerifiedToken {
            subject_id,
            role: claims.role,
            expires_at: claims.exp,
        })
    }
}

/// Extract bearer token from Authorization header.
///
/// The scheme is case-sensitive: only `Bearer <token>` is accepted.
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<&str, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
