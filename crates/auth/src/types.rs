//! Identity types shared by the token issuer, the guard, and the credential store

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Principal role for authorization decisions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Authenticated identity. Never carries the secret hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Stored credential row: the principal plus its one-way secret hash.
///
/// Only the login path sees this type; everything downstream of the
/// guard works with [`Principal`].
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub principal: Principal,
    pub secret_hash: String,
}

/// Input for creating a credential. The secret is already hashed.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub name: String,
    pub email: String,
    pub secret_hash: String,
    pub role: Role,
}
