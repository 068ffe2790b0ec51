use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nextcar_core::error::CoreError;
use serde::Serialize;

/// Error returned by every handler.
///
/// Domain failures arrive as [`CoreError`]; the other variants cover what
/// only the HTTP layer knows about. Rendered as `{"error", "code"}` JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Logged in full, shown to the client as a generic message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

const GENERIC_500: &str = "An internal error occurred";

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        let body = |code, error: String| ErrorBody { error, code };

        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                body("NOT_FOUND", format!("{entity} with id {id} not found")),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, body("VALIDATION_ERROR", msg.clone()))
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, body("CONFLICT", msg.clone()))
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, body("UNAUTHORIZED", msg.clone()))
            }
            AppError::Core(CoreError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, body("FORBIDDEN", msg.clone()))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, body("BAD_REQUEST", msg.clone()))
            }
            AppError::Database(err) => database_failure(err),
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "request failed");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, ErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody {
            error: GENERIC_500.to_string(),
            code: "INTERNAL_ERROR",
        },
    )
}

/// Map driver errors that mean something to the client; hide the rest.
///
/// Only unique constraints named `uq_*` become 409. A foreign-key violation
/// means the parent row vanished, so it is reported as 404.
fn database_failure(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    const UNIQUE_VIOLATION: &str = "23505";
    const FOREIGN_KEY_VIOLATION: &str = "23503";

    let mapped = match err {
        sqlx::Error::RowNotFound => Some((
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        )),
        sqlx::Error::Database(db) => match (db.code().as_deref(), db.constraint()) {
            (Some(UNIQUE_VIOLATION), Some(name)) if name.starts_with("uq_") => Some((
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {name}"),
            )),
            (Some(FOREIGN_KEY_VIOLATION), _) => Some((
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Referenced resource not found".to_string(),
            )),
            _ => None,
        },
        _ => None,
    };

    match mapped {
        Some((status, code, error)) => (status, ErrorBody { error, code }),
        None => {
            tracing::error!(error = %err, "database error");
            internal()
        }
    }
}
