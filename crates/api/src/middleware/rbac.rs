//! Role gate for user management.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use nextcar_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] whose stored role is `admin`; anyone else gets 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::debug!(user_id = %user.user_id, role = %user.role, "admin route refused");
            return Err(AppError::Core(CoreError::Forbidden(
                "Only administrators can manage users".into(),
            )));
        }
        Ok(Self(user))
    }
}
