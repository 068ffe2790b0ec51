//! Admin-only user management under `/dashboard/users`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nextcar_core::auth::validate_new_password;
use nextcar_core::error::CoreError;
use nextcar_core::roles::{validate_role, ROLE_EDITOR};
use nextcar_core::types::DbId;
use nextcar_core::validation::{non_blank, validate_email, validate_required_text};
use nextcar_db::models::user::{CreateUser, UserResponse};
use nextcar_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const MAX_USERNAME_LENGTH: usize = 50;

/// Request body for `POST /dashboard/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    /// Defaults to `editor`.
    pub role: Option<String>,
}

/// GET /api/v1/dashboard/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/v1/dashboard/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let username = input.username.trim().to_string();
    validate_required_text("username", &username, MAX_USERNAME_LENGTH)?;
    validate_new_password(&input.password)?;

    let email = non_blank(input.email);
    if let Some(email) = &email {
        validate_email(email)?;
    }
    let role = non_blank(input.role).unwrap_or_else(|| ROLE_EDITOR.to_string());
    validate_role(&role)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email,
            password_hash,
            role: Some(role),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %user.role, created_by = %admin.user_id, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PATCH /api/v1/dashboard/users/{id}/deactivate
///
/// Deactivated users can no longer log in, and their outstanding tokens stop
/// working on the next request.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    if id == admin.user_id {
        return Err(AppError::BadRequest("You cannot deactivate your own account".into()));
    }

    let user = UserRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = %id, deactivated_by = %admin.user_id, "User deactivated");
    Ok(Json(UserResponse::from(user)))
}
