//! Account API handlers
//!
//! Implements:
//! - POST /auth/register: Create a principal and return a token
//! - POST /auth/login: Exchange credentials for a token
//! - GET /auth/me: Return the principal behind the bearer token

use axum::{extract::State, http::StatusCode, Json};
use cinedex_auth::{AuthUser, Principal, Role};
use cinedex_common::{Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::credentials::{self, Registration, Session};

/// Request for registering a new account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Defaults to `user`
    #[serde(default)]
    pub role: Option<Role>,
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response for register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.principal.id,
            name: session.principal.name,
            email: session.principal.email,
            role: session.principal.role,
            token: session.token.value,
        }
    }
}

fn validate_not_blank(value: &str) -> std::result::Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// POST /auth/register
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let registration = Registration {
        name: request.name,
        email: request.email,
        password: request.password,
        role: request.role.unwrap_or_default(),
    };

    let session = credentials::register(&state.auth, registration).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let session = credentials::login(&state.auth, &request.email, &request.password).await?;
    Ok(Json(session.into()))
}

/// GET /auth/me
pub async fn me(AuthUser(ctx): AuthUser) -> Json<Principal> {
    Json(ctx.principal)
}
