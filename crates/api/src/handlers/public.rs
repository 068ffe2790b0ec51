//! Unauthenticated handlers backing the public website.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use nextcar_core::error::CoreError;
use nextcar_core::inquiry::{validate_contact, validate_sale_request};
use nextcar_core::types::DbId;
use nextcar_core::vehicle::{
    PageRequest, VehicleFilters, VehicleListQuery, VehicleSort, DEFAULT_FEATURED_PAGE_SIZE,
};
use nextcar_db::models::contact::{Contact, CreateContact};
use nextcar_db::models::vehicle::{FilterOptions, VehicleDetail, VehicleSummary};
use nextcar_db::models::vehicle_sale::{CreateVehicleSale, VehicleSale};
use nextcar_db::repositories::{ContactRepo, VehicleRepo, VehicleSaleRepo};

use crate::error::{AppError, AppResult};
use crate::query::PageParams;
use crate::response::Paginated;
use crate::state::AppState;

/// GET /api/v1/public/vehicles
///
/// Catalog cards filtered, sorted, and paginated from the query string.
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<VehicleListQuery>,
) -> AppResult<Json<Paginated<VehicleSummary>>> {
    let (filters, sort, page) = params.into_parts()?;
    summaries_page(&state, filters, sort, page).await
}

/// GET /api/v1/public/vehicles/featured
pub async fn featured_vehicles(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Paginated<VehicleSummary>>> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_FEATURED_PAGE_SIZE)?;
    let filters = VehicleFilters {
        featured: Some(true),
        ..Default::default()
    };
    summaries_page(&state, filters, VehicleSort::default(), page).await
}

/// GET /api/v1/public/vehicles/filter-options
pub async fn filter_options(State(state): State<AppState>) -> AppResult<Json<FilterOptions>> {
    let options = VehicleRepo::filter_options(&state.pool).await?;
    Ok(Json(options))
}

/// GET /api/v1/public/vehicles/{id}
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleDetail>> {
    let vehicle = VehicleRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vehicle",
            id,
        }))?;
    Ok(Json(vehicle))
}

/// POST /api/v1/public/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    Json(input): Json<CreateContact>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    validate_contact(&input.inquirer(), &input.message)?;

    let contact = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(contact_id = %contact.id, "Contact inquiry received");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// POST /api/v1/public/vehicle-sales
pub async fn create_vehicle_sale(
    State(state): State<AppState>,
    Json(input): Json<CreateVehicleSale>,
) -> AppResult<(StatusCode, Json<VehicleSale>)> {
    validate_sale_request(
        &input.inquirer(),
        input.message.as_deref(),
        &input.offered_vehicle(),
    )?;

    let sale = VehicleSaleRepo::create(&state.pool, &input).await?;
    tracing::info!(
        vehicle_sale_id = %sale.id,
        brand = %sale.vehicle_brand,
        model = %sale.vehicle_model,
        "Vehicle sale request received",
    );
    Ok((StatusCode::CREATED, Json(sale)))
}

async fn summaries_page(
    state: &AppState,
    filters: VehicleFilters,
    sort: VehicleSort,
    page: PageRequest,
) -> AppResult<Json<Paginated<VehicleSummary>>> {
    let (data, total) = tokio::try_join!(
        VehicleRepo::list_summaries(&state.pool, &filters, sort, page),
        VehicleRepo::count(&state.pool, &filters),
    )?;
    Ok(Json(Paginated {
        data,
        pagination: page.meta(total),
        filters,
    }))
}
