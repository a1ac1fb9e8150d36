//! Password hashing and verification using bcrypt.
//!
//! Hashing is an explicit call at the registration site, never a hidden
//! side effect of persistence. The cost factor comes from configuration
//! and is tuned so hashing takes tens of milliseconds.

use bcrypt::BcryptError;

/// Hash a plaintext password for storage.
pub fn hash(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch. A malformed stored hash is an error,
/// not a mismatch.
pub fn verify(password: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(password, hash)
}
