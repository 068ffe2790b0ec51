//! Password and reset-token policy shared by the auth handlers.

use crate::error::CoreError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Lifetime of a password-reset token, in minutes.
pub const RESET_TOKEN_TTL_MINS: i64 = 30;

/// Generic answer to forgot-password requests, whether or not the address
/// belongs to a user.
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If the email is registered, a password reset link has been sent";

/// Validate that a new password is acceptable.
pub fn validate_new_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    if password.trim().is_empty() {
        return Err(CoreError::Validation("Password must not be blank".into()));
    }
    Ok(())
}

/// Build the link sent in password-reset emails.
pub fn reset_url(frontend_url: &str, token: &str) -> String {
    format!(
        "{}/reset-password?token={token}",
        frontend_url.trim_end_matches('/')
    )
}
