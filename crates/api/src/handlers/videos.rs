//! Handlers for vehicle videos: uploads under `/dashboard/vehicles/{id}/videos`
//! and management under `/dashboard/videos`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use nextcar_core::error::CoreError;
use nextcar_core::media::MediaKind;
use nextcar_core::types::DbId;
use nextcar_db::models::video::{CreateVehicleVideo, VehicleVideo};
use nextcar_db::repositories::VideoRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::images::ensure_vehicle_exists;
use crate::handlers::uploads::{read_uploads, remove_stored, store_all};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/vehicles/{id}/videos
pub async fn list_vehicle_videos(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(vehicle_id): Path<DbId>,
) -> AppResult<Json<Vec<VehicleVideo>>> {
    ensure_vehicle_exists(&state, vehicle_id).await?;
    let videos = VideoRepo::list_by_vehicle(&state.pool, vehicle_id).await?;
    Ok(Json(videos))
}

/// POST /api/v1/dashboard/vehicles/{id}/videos
///
/// Multipart form with up to 5 files in the `videos` field.
pub async fn upload_vehicle_videos(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(vehicle_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<VehicleVideo>>>)> {
    ensure_vehicle_exists(&state, vehicle_id).await?;

    let files = read_uploads(multipart, MediaKind::Video).await?;
    let stored = store_all(state.media.as_ref(), MediaKind::Video, files).await?;

    let mut videos = Vec::with_capacity(stored.len());
    let mut pending = stored.into_iter();
    while let Some(upload) = pending.next() {
        let input = CreateVehicleVideo {
            vehicle_id,
            url: upload.stored.url,
            public_id: Some(upload.stored.public_id.clone()),
            filename: Some(upload.filename),
        };
        match VideoRepo::create(&state.pool, &input).await {
            Ok(video) => videos.push(video),
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
        count = videos.len(),
        "Vehicle videos uploaded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: videos })))
}

/// GET /api/v1/dashboard/videos
pub async fn list_videos(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<VehicleVideo>>> {
    let videos = VideoRepo::list_all(&state.pool).await?;
    Ok(Json(videos))
}

/// GET /api/v1/dashboard/videos/{id}
pub async fn get_video(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleVideo>> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleVideo",
            id,
        }))?;
    Ok(Json(video))
}

/// DELETE /api/v1/dashboard/videos/{id}
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let video = VideoRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VehicleVideo",
            id,
        }))?;
    remove_stored(state.media.as_ref(), video.public_id).await;

    tracing::info!(video_id = %id, vehicle_id = %video.vehicle_id, user_id = %auth.user_id, "Vehicle video deleted");
    Ok(StatusCode::NO_CONTENT)
}
