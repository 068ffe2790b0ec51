//! Vehicle video model and DTOs.

use nextcar_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `vehicle_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleVideo {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub url: String,
    pub public_id: Option<String>,
    pub filename: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a stored video.
#[derive(Debug, Clone)]
pub struct CreateVehicleVideo {
    pub vehicle_id: DbId,
    pub url: String,
    pub public_id: Option<String>,
    pub filename: Option<String>,
}
