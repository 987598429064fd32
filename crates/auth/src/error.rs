//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Token verification failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature does not match")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token is not a well-formed signed value")]
    Malformed,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Guard and gate rejections
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    /// Covers invalid, expired and malformed tokens alike
    InvalidToken,
    UserNotFound,
    UserLoadError,
    /// Authenticated but the role does not satisfy the route
    Forbidden,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UserLoadError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        AuthError::InvalidToken
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message) = match self {
            AuthError::MissingAuthorization => {
                ("MISSING_AUTHORIZATION", "Not authorized, no token")
            }
            AuthError::InvalidAuthorizationFormat => (
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => ("INVALID_TOKEN", "Not authorized, token failed"),
            AuthError::UserNotFound => ("USER_NOT_FOUND", "User not found"),
            AuthError::UserLoadError => ("USER_LOAD_ERROR", "Internal server error"),
            AuthError::Forbidden => ("FORBIDDEN", "Admin access denied"),
        };

        let body = Json(json!({
            "message": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
