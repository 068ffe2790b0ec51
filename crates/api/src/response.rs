//! Shared response envelope types for API handlers.
//!
//! Single entities and plain lists are returned bare. Paginated listings use
//! [`Paginated`], batch results use [`DataResponse`], and actions with no
//! entity to return answer with a [`MessageResponse`].

use nextcar_core::vehicle::{PageMeta, VehicleFilters};
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a vehicle listing with its pagination block and the filters
/// that were applied.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
    pub filters: VehicleFilters,
}

/// `{ "message": "..." }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
