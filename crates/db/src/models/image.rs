//! Vehicle image model and DTOs.

use nextcar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `vehicle_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleImage {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub url: String,
    pub public_id: Option<String>,
    pub filename: Option<String>,
    pub is_principal: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for recording a stored image.
///
/// `sort_order` is assigned after the vehicle's last image; the first image
/// of a vehicle becomes its principal image.
#[derive(Debug, Clone)]
pub struct CreateVehicleImage {
    pub vehicle_id: DbId,
    pub url: String,
    pub public_id: Option<String>,
    pub filename: Option<String>,
}

/// One entry of an image reorder request.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageOrder {
    pub id: DbId,
    pub sort_order: i32,
}

/// Request body for `PATCH /dashboard/images/order`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateImagesOrder {
    pub images: Vec<ImageOrder>,
}
