//! Repository for the `vehicle_images` table.
//!
//! Keeps two invariants per vehicle: at most one principal image (also
//! backed by the `uq_vehicle_images_principal` partial index) and, whenever
//! a vehicle has images, exactly one of them is principal. Mutations that
//! touch the principal flag lock the owning vehicle row first so concurrent
//! requests for the same vehicle serialize.

use nextcar_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::image::{CreateVehicleImage, ImageOrder, VehicleImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, vehicle_id, url, public_id, filename, is_principal, sort_order, created_at";

/// Display order: principal first, then explicit order, then upload time.
const DISPLAY_ORDER: &str = "is_principal DESC, sort_order ASC, created_at ASC, id ASC";

/// Provides CRUD and ordering operations for vehicle images.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image after the vehicle's existing images.
    ///
    /// The first image of a vehicle becomes its principal image.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVehicleImage,
    ) -> Result<VehicleImage, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_vehicle(&mut tx, input.vehicle_id).await?;

        let query = format!(
            "INSERT INTO vehicle_images (vehicle_id, url, public_id, filename, sort_order, is_principal)
             VALUES (
                $1, $2, $3, $4,
                (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM vehicle_images WHERE vehicle_id = $1),
                NOT EXISTS (SELECT 1 FROM vehicle_images WHERE vehicle_id = $1 AND is_principal)
             )
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, VehicleImage>(&query)
            .bind(input.vehicle_id)
            .bind(&input.url)
            .bind(&input.public_id)
            .bind(&input.filename)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Find an image by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VehicleImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_images WHERE id = $1");
        sqlx::query_as::<_, VehicleImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every image, grouped by vehicle in display order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<VehicleImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_images ORDER BY vehicle_id, {DISPLAY_ORDER}"
        );
        sqlx::query_as::<_, VehicleImage>(&query).fetch_all(pool).await
    }

    /// List a vehicle's images in display order.
    pub async fn list_by_vehicle(
        pool: &PgPool,
        vehicle_id: DbId,
    ) -> Result<Vec<VehicleImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_images WHERE vehicle_id = $1 ORDER BY {DISPLAY_ORDER}"
        );
        sqlx::query_as::<_, VehicleImage>(&query)
            .bind(vehicle_id)
            .fetch_all(pool)
            .await
    }

    /// Batch-load images for several vehicles, each vehicle's in display order.
    pub async fn list_for_vehicles(
        pool: &PgPool,
        vehicle_ids: &[DbId],
    ) -> Result<Vec<VehicleImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_images WHERE vehicle_id = ANY($1)
             ORDER BY vehicle_id, {DISPLAY_ORDER}"
        );
        sqlx::query_as::<_, VehicleImage>(&query)
            .bind(vehicle_ids)
            .fetch_all(pool)
            .await
    }

    /// Make an image its vehicle's principal image.
    ///
    /// Clears the flag on the vehicle's other images, then sets it on this
    /// one, in a single transaction. Returns `None` if the image does not exist.
    pub async fn set_principal(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VehicleImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let vehicle_id: Option<DbId> =
            sqlx::query_scalar("SELECT vehicle_id FROM vehicle_images WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(vehicle_id) = vehicle_id else {
            return Ok(None);
        };
        lock_vehicle(&mut tx, vehicle_id).await?;

        sqlx::query(
            "UPDATE vehicle_images SET is_principal = FALSE
             WHERE vehicle_id = $1 AND is_principal AND id <> $2",
        )
        .bind(vehicle_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE vehicle_images SET is_principal = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, VehicleImage>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Apply new sort orders to a batch of images atomically.
    ///
    /// Returns the updated images in request order, or `None` (with nothing
    /// written) if any ID does not exist.
    pub async fn update_order(
        pool: &PgPool,
        items: &[ImageOrder],
    ) -> Result<Option<Vec<VehicleImage>>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE vehicle_images SET sort_order = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );

        let mut updated = Vec::with_capacity(items.len());
        for item in items {
            let image = sqlx::query_as::<_, VehicleImage>(&query)
                .bind(item.id)
                .bind(item.sort_order)
                .fetch_optional(&mut *tx)
                .await?;
            match image {
                Some(image) => updated.push(image),
                // Dropping the transaction rolls it back.
                None => return Ok(None),
            }
        }

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Delete an image, returning the removed row.
    ///
    /// If it was the principal image, the next image in display order is
    /// promoted. Returns `None` if the image does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<VehicleImage>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let vehicle_id: Option<DbId> =
            sqlx::query_scalar("SELECT vehicle_id FROM vehicle_images WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(vehicle_id) = vehicle_id else {
            return Ok(None);
        };
        // Vehicle before image rows, the same order as `create` and `set_principal`.
        lock_vehicle(&mut tx, vehicle_id).await?;

        let query = format!("DELETE FROM vehicle_images WHERE id = $1 RETURNING {COLUMNS}");
        let deleted = sqlx::query_as::<_, VehicleImage>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(deleted) = deleted else {
            return Ok(None);
        };

        if deleted.is_principal {
            let promote = format!(
                "UPDATE vehicle_images SET is_principal = TRUE
                 WHERE id = (
                    SELECT id FROM vehicle_images WHERE vehicle_id = $1
                    ORDER BY {DISPLAY_ORDER} LIMIT 1
                 )"
            );
            sqlx::query(&promote)
                .bind(deleted.vehicle_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(deleted))
    }
}

/// Take a row lock on the vehicle owning the images being changed.
async fn lock_vehicle(conn: &mut PgConnection, vehicle_id: DbId) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
        .bind(vehicle_id)
        .execute(conn)
        .await?;
    Ok(())
}
