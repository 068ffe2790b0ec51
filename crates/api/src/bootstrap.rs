//! First-run admin account creation.

use nextcar_core::auth::validate_new_password;
use nextcar_core::roles::ROLE_ADMIN;
use nextcar_db::models::user::CreateUser;
use nextcar_db::repositories::UserRepo;
use nextcar_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Credentials for the initial admin account.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

impl AdminSeed {
    /// Read `ADMIN_USERNAME`, `ADMIN_PASSWORD`, and optional `ADMIN_EMAIL`.
    ///
    /// Returns `None` unless both username and password are set.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("ADMIN_USERNAME").ok().filter(|u| !u.trim().is_empty())?;
        let password = std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty())?;
        Some(Self {
            username: username.trim().to_string(),
            password,
            email: std::env::var("ADMIN_EMAIL").ok().filter(|e| !e.trim().is_empty()),
        })
    }
}

/// Create the seed admin if the users table is empty.
///
/// Returns `true` when a user was created.
pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<bool> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(false);
    }
    validate_new_password(&seed.password)?;

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: seed.username.clone(),
            email: seed.email.clone(),
            password_hash,
            role: Some(ROLE_ADMIN.to_string()),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Created initial admin user");
    Ok(true)
}
