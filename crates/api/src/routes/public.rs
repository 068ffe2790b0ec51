//! Route definitions for the unauthenticated `/public` surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET  /vehicles                  -> list_vehicles
/// GET  /vehicles/featured         -> featured_vehicles
/// GET  /vehicles/filter-options   -> filter_options
/// GET  /vehicles/{id}             -> get_vehicle
/// POST /contacts                  -> create_contact
/// POST /vehicle-sales             -> create_vehicle_sale
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(public::list_vehicles))
        .route("/vehicles/featured", get(public::featured_vehicles))
        .route("/vehicles/filter-options", get(public::filter_options))
        .route("/vehicles/{id}", get(public::get_vehicle))
        .route("/contacts", post(public::create_contact))
        .route("/vehicle-sales", post(public::create_vehicle_sale))
}
