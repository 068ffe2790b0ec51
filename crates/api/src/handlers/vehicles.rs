//! Handlers for the `/dashboard/vehicles` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use nextcar_core::error::CoreError;
use nextcar_core::types::DbId;
use nextcar_core::vehicle::{validate_vehicle_fields, VehicleListQuery};
use nextcar_db::models::vehicle::{
    CreateVehicle, HighlightVehicle, UpdateVehicle, Vehicle, VehicleDetail,
};
use nextcar_db::repositories::{ImageRepo, VehicleRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::remove_stored;
use crate::middleware::auth::AuthUser;
use crate::response::Paginated;
use crate::state::AppState;

/// GET /api/v1/dashboard/vehicles
///
/// Same query parameters as the public catalog, but returns full vehicles
/// with their media.
pub async fn list_vehicles(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<VehicleListQuery>,
) -> AppResult<Json<Paginated<VehicleDetail>>> {
    let (filters, sort, page) = params.into_parts()?;
    let (data, total) = tokio::try_join!(
        VehicleRepo::list_details(&state.pool, &filters, sort, page),
        VehicleRepo::count(&state.pool, &filters),
    )?;
    Ok(Json(Paginated {
        data,
        pagination: page.meta(total),
        filters,
    }))
}

/// GET /api/v1/dashboard/vehicles/all
pub async fn list_all_vehicles(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<VehicleDetail>>> {
    let vehicles = VehicleRepo::list_all(&state.pool).await?;
    Ok(Json(vehicles))
}

/// POST /api/v1/dashboard/vehicles
pub async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateVehicle>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    validate_vehicle_fields(&input.fields())?;

    let vehicle = VehicleRepo::create(&state.pool, &input).await?;
    tracing::info!(
        vehicle_id = %vehicle.id,
        user_id = %auth.user_id,
        brand = %vehicle.brand,
        model = %vehicle.model,
        "Vehicle created",
    );
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// GET /api/v1/dashboard/vehicles/{id}
pub async fn get_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleDetail>> {
    let vehicle = VehicleRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Json(vehicle))
}

/// PATCH /api/v1/dashboard/vehicles/{id}
///
/// Partial update: omitted fields keep their stored values. Responds with
/// the vehicle and its media, like `get_vehicle`.
pub async fn update_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVehicle>,
) -> AppResult<Json<VehicleDetail>> {
    validate_vehicle_fields(&input.fields())?;

    let vehicle = VehicleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    tracing::info!(vehicle_id = %id, user_id = %auth.user_id, "Vehicle updated");
    with_media(&state, vehicle).await
}

/// DELETE /api/v1/dashboard/vehicles/{id}
///
/// Media rows go with the vehicle; the stored files are removed after the
/// transaction commits.
pub async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let public_ids = VehicleRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    let removed = public_ids.len();
    remove_stored(state.media.as_ref(), public_ids).await;

    tracing::info!(vehicle_id = %id, user_id = %auth.user_id, media = removed, "Vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/dashboard/vehicles/{id}/highlight
pub async fn highlight_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<HighlightVehicle>,
) -> AppResult<Json<VehicleDetail>> {
    let vehicle = VehicleRepo::set_featured(&state.pool, id, input.featured)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    with_media(&state, vehicle).await
}

fn vehicle_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Vehicle",
        id,
    })
}

async fn with_media(state: &AppState, vehicle: Vehicle) -> AppResult<Json<VehicleDetail>> {
    let (images, videos) = tokio::try_join!(
        ImageRepo::list_by_vehicle(&state.pool, vehicle.id),
        VideoRepo::list_by_vehicle(&state.pool, vehicle.id),
    )?;
    Ok(Json(VehicleDetail {
        vehicle,
        images,
        videos,
    }))
}
