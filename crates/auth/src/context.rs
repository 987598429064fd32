//! Authorization context for authenticated principals

use uuid::Uuid;

use crate::types::{Principal, Role};

/// Typed request context produced by the guard and passed to handlers
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub principal: Principal,
}

impl AuthContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn user_id(&self) -> Uuid {
        self.principal.id
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }

    /// Check if the principal holds the admin role
    pub fn is_admin(&self) -> bool {
        self.principal.role == Role::Admin
    }
}
