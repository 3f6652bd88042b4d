//! Request Validation Module
//!
//! Signup field validation. Error messages are user-facing.

use crate::error::{AppError, Result};

/// Minimum username length
const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length
const MIN_PASSWORD_LEN: usize = 6;

/// Maximum accepted length for any account field
const MAX_FIELD_LEN: usize = 256;

/// Maximum accepted chat message length
const MAX_MESSAGE_LEN: usize = 4000;

/// Validate signup fields
///
/// Checks mirror the account rules: all fields required, username at
/// least 3 characters, password at least 6, email must contain '@'.
pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<()> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("All fields are required".to_string()));
    }

    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(AppError::Validation(
            "Username must be at least 3 characters".to_string(),
        ));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if !email.contains('@') {
        return Err(AppError::Validation(
            "Please provide a valid email".to_string(),
        ));
    }

    if username.len() > MAX_FIELD_LEN || email.len() > MAX_FIELD_LEN || password.len() > MAX_FIELD_LEN
    {
        return Err(AppError::Validation("Field is too long".to_string()));
    }

    Ok(())
}

/// Validate a chat message before processing
pub fn validate_chat_message(message: &str) -> Result<()> {
    if message.len() > MAX_MESSAGE_LEN {
        return Err(AppError::Validation(format!(
            "Message is too long (max {} characters)",
            MAX_MESSAGE_LEN
        )));
    }

    Ok(())
}
