//! Failures shared by every layer of the dealership backend.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row with this id, e.g. `entity = "Vehicle"`.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Input rejected before touching storage.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The request clashes with the current state of the data.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
