use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Runtime settings, read once at startup.
///
/// Only `JWT_SECRET` is mandatory; everything else falls back to a value
/// that works for a local checkout.
///
/// | Env Var                | Default                    |
/// |------------------------|----------------------------|
/// | `HOST`                 | `0.0.0.0`                  |
/// | `PORT`                 | `3000`                     |
/// | `CORS_ORIGINS`         | `http://localhost:5173`    |
/// | `REQUEST_TIMEOUT_SECS` | `30`                       |
/// | `APP_ENV`              | `development`              |
/// | `FRONTEND_URL`         | `http://localhost:3000`    |
/// | `MEDIA_ROOT`           | `storage/media`            |
/// | `MEDIA_BASE_URL`       | `/media`                   |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Frontend origins allowed by CORS (comma-separated in the env).
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Reported by `/health`.
    pub app_env: String,
    /// Public site root; reset links point here.
    pub frontend_url: String,
    /// Where uploaded images and videos are written.
    pub media_root: PathBuf,
    /// URL prefix stored media is reachable under, without trailing slash.
    pub media_base_url: String,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// # Panics
    ///
    /// When a numeric variable does not parse or the JWT secret is missing.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parsed("PORT", 3000),
            cors_origins: split_origins(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", 30),
            app_env: env_or("APP_ENV", "development"),
            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
            media_root: PathBuf::from(env_or("MEDIA_ROOT", "storage/media")),
            media_base_url: env_or("MEDIA_BASE_URL", "/media")
                .trim_end_matches('/')
                .to_string(),
            jwt: JwtConfig::from_env(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key}='{raw}' is not valid: {e}")),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
