//! Password hashing via bcrypt.
//!
//! Both functions are CPU-bound; async callers run them on the blocking pool.

use cinedex_common::Error;

/// bcrypt cost factor.
pub const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt.
pub fn hash_password(password: &str, cost: u32) -> Result<String, Error> {
    bcrypt::hash(password, cost).map_err(|e| Error::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a stored bcrypt hash.
///
/// A corrupt stored hash counts as a mismatch so login answers the same
/// way it does for a wrong password.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}

/// Spend one bcrypt round at `cost` for a login with no stored hash.
///
/// Keeps unknown-email logins as slow as wrong-password ones. Never matches.
pub fn verify_without_hash(password: &str, cost: u32) -> bool {
    if let Err(e) = bcrypt::hash(password, cost) {
        tracing::debug!(error = %e, "Placeholder bcrypt round failed");
    }
    false
}
