//! Repository for the `contacts` table.

use nextcar_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Contact, CreateContact};
use crate::models::dashboard::MonthCount;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, first_name, last_name, city, province, phone, email, message, created_at";

/// Provides CRUD and reporting queries for contact inquiries.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact inquiry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (first_name, last_name, city, province, phone, email, message)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(input.city.trim())
            .bind(input.province.trim())
            .bind(input.phone.trim())
            .bind(input.email.trim())
            .bind(input.message.trim())
            .fetch_one(pool)
            .await
    }

    /// Find a contact inquiry by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all contact inquiries, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, id ASC");
        sqlx::query_as::<_, Contact>(&query).fetch_all(pool).await
    }

    /// Delete a contact inquiry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of contact inquiries.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(pool)
            .await
    }

    /// Inquiries received in the last `days` days.
    pub async fn count_recent(pool: &PgPool, days: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM contacts WHERE created_at >= NOW() - make_interval(days => $1)",
        )
        .bind(days)
        .fetch_one(pool)
        .await
    }

    /// Inquiries per calendar month for the last `months` months (current
    /// month included), oldest first. Months without inquiries are omitted.
    pub async fn counts_by_month(pool: &PgPool, months: i32) -> Result<Vec<MonthCount>, sqlx::Error> {
        sqlx::query_as::<_, MonthCount>(
            "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month,
                    COUNT(*) AS count
             FROM contacts
             WHERE created_at >= date_trunc('month', NOW()) - make_interval(months => $1 - 1)
             GROUP BY 1
             ORDER BY 1 ASC",
        )
        .bind(months)
        .fetch_all(pool)
        .await
    }
}
