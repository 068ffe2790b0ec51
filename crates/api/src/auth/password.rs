//! Password storage for dashboard accounts.
//!
//! Stored values are Argon2id PHC strings, which carry their own salt and
//! cost parameters.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash `password` with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
}

/// Compare `password` with a stored hash.
///
/// A wrong password is `Ok(false)`; `Err` means the stored hash is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let stored = PasswordHash::new(hash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &stored)
        .map(|()| true)
        .or_else(|e| match e {
            Error::Password => Ok(false),
            other => Err(other),
        })
}
