//! Aggregated statistics for the admin dashboard landing page.

use axum::extract::State;
use axum::Json;
use indexmap::IndexMap;
use nextcar_core::vehicle::STATS_BUCKETS;
use nextcar_db::repositories::{ContactRepo, VehicleRepo, VehicleSaleRepo};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Window for `recent_contacts`.
const RECENT_CONTACT_DAYS: i32 = 30;

/// Window for `contacts_by_month`, including the current month.
const CONTACT_HISTORY_MONTHS: i32 = 12;

/// Response body for `GET /dashboard/stats`.
///
/// The map fields keep their query order when serialized: brands by count
/// descending, years newest first, months oldest first.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_vehicles: i64,
    pub featured_vehicles: i64,
    pub average_price: Decimal,
    pub vehicles_by_brand: IndexMap<String, i64>,
    pub vehicles_by_year: IndexMap<String, i64>,
    pub total_contacts: i64,
    pub recent_contacts: i64,
    pub contacts_by_month: IndexMap<String, i64>,
    pub pending_sales: i64,
}

/// GET /api/v1/dashboard/stats
pub async fn get_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DashboardStats>> {
    let pool = &state.pool;
    let (totals, by_brand, by_year, total_contacts, recent_contacts, by_month, pending_sales) = tokio::try_join!(
        VehicleRepo::totals(pool),
        VehicleRepo::count_by_brand(pool, STATS_BUCKETS),
        VehicleRepo::count_by_year(pool, STATS_BUCKETS),
        ContactRepo::count(pool),
        ContactRepo::count_recent(pool, RECENT_CONTACT_DAYS),
        ContactRepo::counts_by_month(pool, CONTACT_HISTORY_MONTHS),
        VehicleSaleRepo::count_pending(pool),
    )?;

    Ok(Json(DashboardStats {
        total_vehicles: totals.total,
        featured_vehicles: totals.featured,
        average_price: totals.average_price,
        vehicles_by_brand: by_brand.into_iter().map(|b| (b.brand, b.count)).collect(),
        vehicles_by_year: by_year
            .into_iter()
            .map(|y| (y.year.to_string(), y.count))
            .collect(),
        total_contacts,
        recent_contacts,
        contacts_by_month: by_month.into_iter().map(|m| (m.month, m.count)).collect(),
        pending_sales,
    }))
}
