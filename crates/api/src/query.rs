//! Shared query parameter types for API handlers.
//!
//! The full vehicle listing query lives in `nextcar_core::vehicle::VehicleListQuery`.

use serde::Deserialize;

/// Page-only parameters (`?page=&limit=`), validated into a
/// `nextcar_core::vehicle::PageRequest` by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
