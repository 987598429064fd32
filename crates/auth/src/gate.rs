//! Role gate: capability check composed after the guard

use crate::error::AuthError;
use crate::types::{Principal, Role};

/// Authorize `principal` for a route that requires `required`.
///
/// A missing principal means the guard did not run; that is rejected as
/// `Forbidden` rather than treated as a crash.
pub fn authorize(principal: Option<&Principal>, required: Role) -> Result<(), AuthError> {
    match principal {
        Some(p) if p.role == required => Ok(()),
        Some(p) => {
            tracing::debug!(user_id = %p.id, role = %p.role, required = %required, "Role gate denied");
            Err(AuthError::Forbidden)
        }
        None => {
            tracing::warn!(required = %required, "Role gate reached without a principal");
            Err(AuthError::Forbidden)
        }
    }
}
