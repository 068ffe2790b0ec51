//! Session tokens for the admin panel.
//!
//! A successful login yields an HS256 bearer token carrying [`Claims`].
//! Password-reset links use a separate opaque value; the database stores
//! only its SHA-256 digest.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use nextcar_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Payload of an admin bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Id of the logged-in user.
    pub sub: DbId,
    /// Role at login time. Authorization re-reads the stored role.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC key for signing and verification.
    pub secret: String,
    /// How long a login stays valid.
    pub access_token_expiry_mins: i64,
}

/// One day.
const SESSION_MINUTES: i64 = 1440;

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_ACCESS_EXPIRY_MINS`
    /// (optional, default one day).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or an unparseable expiry.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => SESSION_MINUTES,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    /// Lifetime of a freshly issued token, in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// Sign a bearer token for `user_id`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued = Utc::now();
    let expires = issued + Duration::minutes(config.access_token_expiry_mins);

    let claims = Claims {
        sub: user_id,
        role: role.to_owned(),
        exp: expires.timestamp(),
        iat: issued.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Check signature and expiry, then return the payload.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::default()).map(|data| data.claims)
}

/// New reset token as `(emailed_value, stored_digest)`.
pub fn generate_reset_token() -> (String, String) {
    let token = Uuid::new_v4().simple().to_string();
    let digest = hash_token(&token);
    (token, digest)
}

/// Hex SHA-256 of a reset token.
pub fn hash_token(token: &str) -> String {
    hex_digest(&Sha256::digest(token.as_bytes()))
}

fn hex_digest(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
