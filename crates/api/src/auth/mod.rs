//! Credentials: [`password`] hashing and [`jwt`] session/reset tokens.

pub mod jwt;
pub mod password;
