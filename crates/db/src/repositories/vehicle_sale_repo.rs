//! Repository for the `vehicle_sales` table.

use nextcar_core::types::DbId;
use sqlx::PgPool;

use crate::models::vehicle_sale::{CreateVehicleSale, VehicleSale};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, city, province, phone, email, message, \
     vehicle_brand, vehicle_model, vehicle_year, vehicle_mileage, vehicle_fuel, \
     vehicle_transmission, vehicle_description, expected_price, processed, created_at";

/// Provides CRUD operations for vehicle-sale requests.
pub struct VehicleSaleRepo;

impl VehicleSaleRepo {
    /// Insert a new vehicle-sale request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVehicleSale,
    ) -> Result<VehicleSale, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicle_sales (
                first_name, last_name, city, province, phone, email, message,
                vehicle_brand, vehicle_model, vehicle_year, vehicle_mileage, vehicle_fuel,
                vehicle_transmission, vehicle_description, expected_price
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VehicleSale>(&query)
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(input.city.trim())
            .bind(input.province.trim())
            .bind(input.phone.trim())
            .bind(input.email.trim())
            .bind(&input.message)
            .bind(input.vehicle_brand.trim())
            .bind(input.vehicle_model.trim())
            .bind(input.vehicle_year)
            .bind(&input.vehicle_mileage)
            .bind(&input.vehicle_fuel)
            .bind(&input.vehicle_transmission)
            .bind(&input.vehicle_description)
            .bind(input.expected_price)
            .fetch_one(pool)
            .await
    }

    /// Find a vehicle-sale request by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VehicleSale>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_sales WHERE id = $1");
        sqlx::query_as::<_, VehicleSale>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all vehicle-sale requests, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<VehicleSale>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_sales ORDER BY created_at DESC, id ASC");
        sqlx::query_as::<_, VehicleSale>(&query).fetch_all(pool).await
    }

    /// Mark a request as processed. Returns `None` if it does not exist.
    pub async fn mark_processed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VehicleSale>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicle_sales SET processed = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VehicleSale>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a request. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicle_sales WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of requests not yet processed.
    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM vehicle_sales WHERE NOT processed")
            .fetch_one(pool)
            .await
    }
}
