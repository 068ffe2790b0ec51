//! Route definitions for the `/auth` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST  /login            -> login
/// GET   /me               -> me (requires auth)
/// PATCH /change-password  -> change_password (requires auth; POST also accepted)
/// POST  /forgot-password  -> forgot_password
/// POST  /reset-password   -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route(
            "/change-password",
            patch(auth::change_password).post(auth::change_password),
        )
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
}
