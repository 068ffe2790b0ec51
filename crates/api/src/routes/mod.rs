pub mod auth;
pub mod dashboard;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         current user (requires auth)
/// /auth/change-password                            change password (requires auth)
/// /auth/forgot-password                            request reset email (public)
/// /auth/reset-password                             reset with emailed token (public)
///
/// /public/vehicles                                 catalog listing (filters, sort, page)
/// /public/vehicles/featured                        featured catalog listing
/// /public/vehicles/filter-options                  distinct filter values
/// /public/vehicles/{id}                            vehicle with images and videos
/// /public/contacts                                 submit contact inquiry
/// /public/vehicle-sales                            submit vehicle-sale request
///
/// /dashboard/stats                                 aggregates (requires auth)
/// /dashboard/vehicles                              list, create
/// /dashboard/vehicles/all                          every vehicle with media
/// /dashboard/vehicles/{id}                         get, update, delete
/// /dashboard/vehicles/{id}/highlight               set featured flag
/// /dashboard/vehicles/{id}/images                  list, upload
/// /dashboard/vehicles/{id}/videos                  list, upload
/// /dashboard/images                                list all
/// /dashboard/images/order                          reorder
/// /dashboard/images/{id}                           get, delete
/// /dashboard/images/{id}/principal                 set principal image
/// /dashboard/videos                                list all
/// /dashboard/videos/{id}                           get, delete
/// /dashboard/contacts                              list
/// /dashboard/contacts/{id}                         get, delete
/// /dashboard/vehicle-sales                         list
/// /dashboard/vehicle-sales/{id}                    get, delete
/// /dashboard/vehicle-sales/{id}/process            mark processed
/// /dashboard/users                                 list, create (admin only)
/// /dashboard/users/{id}/deactivate                 deactivate (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and password management.
        .nest("/auth", auth::router())
        // Public website: catalog and inquiry forms.
        .nest("/public", public::router())
        // Admin panel.
        .nest("/dashboard", dashboard::router())
}
