//! Password Hashing Module
//!
//! bcrypt hashing and verification. Plain-text passwords never leave
//! this module's call sites.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::error::{AppError, Result};

/// Hash a plain-text password with bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a plain-text password against a stored bcrypt hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    verify(password, password_hash)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
