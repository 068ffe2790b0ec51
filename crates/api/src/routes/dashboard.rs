//! Route definitions for the `/dashboard` admin panel.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;
use nextcar_core::media::MediaKind;

use crate::handlers::uploads::body_limit;
use crate::handlers::{contacts, dashboard, images, users, vehicle_sales, vehicles, videos};
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// Every route requires authentication; `/users` additionally requires the
/// `admin` role (enforced by handler extractors). Upload routes accept a
/// larger body than the axum default.
///
/// ```text
/// GET    /stats                         -> get_stats
/// GET    /vehicles                      -> list_vehicles
/// POST   /vehicles                      -> create_vehicle
/// GET    /vehicles/all                  -> list_all_vehicles
/// GET    /vehicles/{id}                 -> get_vehicle
/// PATCH  /vehicles/{id}                 -> update_vehicle (PUT also accepted)
/// DELETE /vehicles/{id}                 -> delete_vehicle
/// PATCH  /vehicles/{id}/highlight       -> highlight_vehicle
/// GET    /vehicles/{id}/images          -> list_vehicle_images
/// POST   /vehicles/{id}/images          -> upload_vehicle_images
/// GET    /vehicles/{id}/videos          -> list_vehicle_videos
/// POST   /vehicles/{id}/videos          -> upload_vehicle_videos
/// GET    /images                        -> list_images
/// PATCH  /images/order                  -> update_images_order
/// GET    /images/{id}                   -> get_image
/// DELETE /images/{id}                   -> delete_image
/// PATCH  /images/{id}/principal         -> set_principal_image
/// GET    /videos                        -> list_videos
/// GET    /videos/{id}                   -> get_video
/// DELETE /videos/{id}                   -> delete_video
/// GET    /contacts                      -> list_contacts
/// GET    /contacts/{id}                 -> get_contact
/// DELETE /contacts/{id}                 -> delete_contact
/// GET    /vehicle-sales                 -> list_vehicle_sales
/// GET    /vehicle-sales/{id}            -> get_vehicle_sale
/// DELETE /vehicle-sales/{id}            -> delete_vehicle_sale
/// PATCH  /vehicle-sales/{id}/process    -> process_vehicle_sale
/// GET    /users                         -> list_users (admin)
/// POST   /users                         -> create_user (admin)
/// PATCH  /users/{id}/deactivate         -> deactivate_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(dashboard::get_stats))
        // Vehicles.
        .route(
            "/vehicles",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route("/vehicles/all", get(vehicles::list_all_vehicles))
        .route(
            "/vehicles/{id}",
            get(vehicles::get_vehicle)
                .patch(vehicles::update_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route(
            "/vehicles/{id}/highlight",
            patch(vehicles::highlight_vehicle),
        )
        // Media uploads.
        .route(
            "/vehicles/{id}/images",
            get(images::list_vehicle_images)
                .post(images::upload_vehicle_images)
                .layer(DefaultBodyLimit::max(body_limit(MediaKind::Image))),
        )
        .route(
            "/vehicles/{id}/videos",
            get(videos::list_vehicle_videos)
                .post(videos::upload_vehicle_videos)
                .layer(DefaultBodyLimit::max(body_limit(MediaKind::Video))),
        )
        // Images.
        .route("/images", get(images::list_images))
        .route("/images/order", patch(images::update_images_order))
        .route(
            "/images/{id}",
            get(images::get_image).delete(images::delete_image),
        )
        .route(
            "/images/{id}/principal",
            patch(images::set_principal_image),
        )
        // Videos.
        .route("/videos", get(videos::list_videos))
        .route(
            "/videos/{id}",
            get(videos::get_video).delete(videos::delete_video),
        )
        // Inquiries.
        .route("/contacts", get(contacts::list_contacts))
        .route(
            "/contacts/{id}",
            get(contacts::get_contact).delete(contacts::delete_contact),
        )
        .route("/vehicle-sales", get(vehicle_sales::list_vehicle_sales))
        .route(
            "/vehicle-sales/{id}",
            get(vehicle_sales::get_vehicle_sale).delete(vehicle_sales::delete_vehicle_sale),
        )
        .route(
            "/vehicle-sales/{id}/process",
            patch(vehicle_sales::process_vehicle_sale),
        )
        // User management (admin only).
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}/deactivate", patch(users::deactivate_user))
}
