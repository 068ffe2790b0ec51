//! Handlers for the `/dashboard/vehicle-sales` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nextcar_core::error::CoreError;
use nextcar_core::types::DbId;
use nextcar_db::models::vehicle_sale::VehicleSale;
use nextcar_db::repositories::VehicleSaleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/dashboard/vehicle-sales
pub async fn list_vehicle_sales(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<VehicleSale>>> {
    let sales = VehicleSaleRepo::list(&state.pool).await?;
    Ok(Json(sales))
}

/// GET /api/v1/dashboard/vehicle-sales/{id}
pub async fn get_vehicle_sale(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleSale>> {
    let sale = VehicleSaleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleSale",
            id,
        }))?;
    Ok(Json(sale))
}

/// PATCH /api/v1/dashboard/vehicle-sales/{id}/process
pub async fn process_vehicle_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleSale>> {
    let sale = VehicleSaleRepo::mark_processed(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleSale",
            id,
        }))?;
    tracing::info!(vehicle_sale_id = %id, user_id = %auth.user_id, "Vehicle sale processed");
    Ok(Json(sale))
}

/// DELETE /api/v1/dashboard/vehicle-sales/{id}
pub async fn delete_vehicle_sale(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if VehicleSaleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "VehicleSale",
            id,
        }))
    }
}
