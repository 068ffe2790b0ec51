//! Aggregate rows behind the dashboard statistics endpoint.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Headline vehicle counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VehicleTotals {
    pub total: i64,
    pub featured: i64,
    /// Average listing price rounded to cents; zero when there are no vehicles.
    pub average_price: Decimal,
}

/// Number of vehicles of one brand.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: i64,
}

/// Number of vehicles of one model year.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: i64,
}

/// Number of rows created in one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: i64,
}
