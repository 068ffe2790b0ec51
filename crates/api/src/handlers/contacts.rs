//! Handlers for the `/dashboard/contacts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nextcar_core::error::CoreError;
use nextcar_core::types::DbId;
use nextcar_db::models::contact::Contact;
use nextcar_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/dashboard/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Contact>>> {
    let contacts = ContactRepo::list(&state.pool).await?;
    Ok(Json(contacts))
}

/// GET /api/v1/dashboard/contacts/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Contact>> {
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contact",
            id,
        }))?;
    Ok(Json(contact))
}

/// DELETE /api/v1/dashboard/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContactRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Contact",
            id,
        }))
    }
}
