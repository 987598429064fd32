//! JWT claims types

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Claims carried by every bearer token issued by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (principal ID)
    pub sub: String,
    /// Role at issuance time
    pub role: Role,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}
