//! Repository for the `vehicle_videos` table.

use nextcar_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVehicleVideo, VehicleVideo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, vehicle_id, url, public_id, filename, created_at";

/// Provides CRUD operations for vehicle videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVehicleVideo,
    ) -> Result<VehicleVideo, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicle_videos (vehicle_id, url, public_id, filename)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VehicleVideo>(&query)
            .bind(input.vehicle_id)
            .bind(&input.url)
            .bind(&input.public_id)
            .bind(&input.filename)
            .fetch_one(pool)
            .await
    }

    /// Find a video by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VehicleVideo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_videos WHERE id = $1");
        sqlx::query_as::<_, VehicleVideo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every video, most recently uploaded first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<VehicleVideo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_videos ORDER BY created_at DESC, id ASC");
        sqlx::query_as::<_, VehicleVideo>(&query).fetch_all(pool).await
    }

    /// List a vehicle's videos in upload order.
    pub async fn list_by_vehicle(
        pool: &PgPool,
        vehicle_id: DbId,
    ) -> Result<Vec<VehicleVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_videos WHERE vehicle_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, VehicleVideo>(&query)
            .bind(vehicle_id)
            .fetch_all(pool)
            .await
    }

    /// Batch-load videos for several vehicles, each vehicle's in upload order.
    pub async fn list_for_vehicles(
        pool: &PgPool,
        vehicle_ids: &[DbId],
    ) -> Result<Vec<VehicleVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_videos WHERE vehicle_id = ANY($1)
             ORDER BY vehicle_id, created_at ASC, id ASC"
        );
        sqlx::query_as::<_, VehicleVideo>(&query)
            .bind(vehicle_ids)
            .fetch_all(pool)
            .await
    }

    /// Delete a video, returning the removed row (`None` if it did not exist).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<VehicleVideo>, sqlx::Error> {
        let query = format!("DELETE FROM vehicle_videos WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, VehicleVideo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
