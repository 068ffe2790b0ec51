//! Handlers for vehicle images: uploads under `/dashboard/vehicles/{id}/images`
//! and management under `/dashboard/images`.

use std::collections::HashSet;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use nextcar_core::error::CoreError;
use nextcar_core::media::MediaKind;
use nextcar_core::types::DbId;
use nextcar_db::models::image::{CreateVehicleImage, UpdateImagesOrder, VehicleImage};
use nextcar_db::repositories::{ImageRepo, VehicleRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::{read_uploads, remove_stored, store_all};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/vehicles/{id}/images
pub async fn list_vehicle_images(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(vehicle_id): Path<DbId>,
) -> AppResult<Json<Vec<VehicleImage>>> {
    ensure_vehicle_exists(&state, vehicle_id).await?;
    let images = ImageRepo::list_by_vehicle(&state.pool, vehicle_id).await?;
    Ok(Json(images))
}

/// POST /api/v1/dashboard/vehicles/{id}/images
///
/// Multipart form with up to 10 files in the `images` field. The first image
/// a vehicle ever receives becomes its principal image.
pub async fn upload_vehicle_images(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(vehicle_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<VehicleImage>>>)> {
    ensure_vehicle_exists(&state, vehicle_id).await?;

    let files = read_uploads(multipart, MediaKind::Image).await?;
    let stored = store_all(state.media.as_ref(), MediaKind::Image, files).await?;

    let mut images = Vec::with_capacity(stored.len());
    let mut pending = stored.into_iter();
    while let Some(upload) = pending.next() {
        let input = CreateVehicleImage {
            vehicle_id,
            url: upload.stored.url,
            public_id: Some(upload.stored.public_id.clone()),
            filename: Some(upload.filename),
        };
        match ImageRepo::create(&state.pool, &input).await {
            Ok(image) => images.push(image),
            Err(e) => {
                let orphaned = std::iter::once(upload.stored.public_id)
                    .chain(pending.map(|u| u.stored.public_id));
                remove_stored(state.media.as_ref(), orphaned).await;
                return Err(e.into());
            }
        }
    }

    tracing::info!(
        vehicle_id = %vehicle_id,
        user_id = %auth.user_id,
        count = images.len(),
        "Vehicle images uploaded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: images })))
}

/// GET /api/v1/dashboard/images
pub async fn list_images(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<VehicleImage>>> {
    let images = ImageRepo::list_all(&state.pool).await?;
    Ok(Json(images))
}

/// GET /api/v1/dashboard/images/{id}
pub async fn get_image(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleImage>> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleImage",
            id,
        }))?;
    Ok(Json(image))
}

/// DELETE /api/v1/dashboard/images/{id}
pub async fn delete_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let image = ImageRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleImage",
            id,
        }))?;
    remove_stored(state.media.as_ref(), image.public_id).await;

    tracing::info!(image_id = %id, vehicle_id = %image.vehicle_id, user_id = %auth.user_id, "Vehicle image deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/dashboard/images/{id}/principal
pub async fn set_principal_image(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleImage>> {
    let image = ImageRepo::set_principal(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleImage",
            id,
        }))?;
    Ok(Json(image))
}

/// PATCH /api/v1/dashboard/images/order
///
/// All-or-nothing: if any id is unknown nothing is changed and the first
/// unknown id is reported.
pub async fn update_images_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<UpdateImagesOrder>,
) -> AppResult<Json<Vec<VehicleImage>>> {
    if input.images.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "images must contain at least one entry".into(),
        )));
    }
    let mut seen = HashSet::with_capacity(input.images.len());
    if let Some(dup) = input.images.iter().find(|item| !seen.insert(item.id)) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Image {} is listed more than once",
            dup.id
        ))));
    }

    if let Some(images) = ImageRepo::update_order(&state.pool, &input.images).await? {
        return Ok(Json(images));
    }

    for item in &input.images {
        if ImageRepo::find_by_id(&state.pool, item.id).await?.is_none() {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "VehicleImage",
                id: item.id,
            }));
        }
    }
    // Only reachable when the images changed between the two reads.
    Err(AppError::Core(CoreError::Conflict(
        "Images changed while reordering, retry the request".into(),
    )))
}

pub(crate) async fn ensure_vehicle_exists(state: &AppState, vehicle_id: DbId) -> AppResult<()> {
    VehicleRepo::find_by_id(&state.pool, vehicle_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vehicle",
            id: vehicle_id,
        }))?;
    Ok(())
}
