//! HTTP-level tests for the unauthenticated `/public` catalog and forms.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, seed_vehicle};
use nextcar_db::models::image::CreateVehicleImage;
use nextcar_db::repositories::{ContactRepo, ImageRepo, VehicleSaleRepo};
use sqlx::PgPool;

async fn seed_catalog(pool: &PgPool) {
    seed_vehicle(pool, "Corolla", "Toyota", 2020, 25_000, true).await;
    seed_vehicle(pool, "Hilux", "Toyota", 2018, 32_000, false).await;
    seed_vehicle(pool, "Gol", "Volkswagen", 2015, 9_000, false).await;
    seed_vehicle(pool, "Cronos", "Fiat", 2022, 18_500, true).await;
}

// ---------------------------------------------------------------------------
// Catalog listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_catalog(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = get(app, "/api/v1/public/vehicles").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["limit"], 10);
    assert_eq!(json["pagination"]["total"], 0);
    assert_eq!(json["pagination"]["total_pages"], 0);
    assert_eq!(json["pagination"]["has_next"], false);
    assert_eq!(json["filters"], serde_json::json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_echoes_them(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool).await;

    let response = get(app, "/api/v1/public/vehicles?brand=Toyota&year_min=2019").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Corolla");
    assert_eq!(data[0]["image"], serde_json::Value::Null);
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["filters"]["brand"], "Toyota");
    assert_eq!(json["filters"]["year_min"], 2019);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_sorts_and_paginates(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool).await;

    let response = get(
        app,
        "/api/v1/public/vehicles?sort_by=price&sort_order=asc&limit=3&page=1",
    )
    .await;

    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Gol", "Cronos", "Corolla"]);
    assert_eq!(json["pagination"]["total"], 4);
    assert_eq!(json["pagination"]["total_pages"], 2);
    assert_eq!(json["pagination"]["has_next"], true);
    assert_eq!(json["pagination"]["has_prev"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_search_is_case_insensitive(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool).await;

    let response = get(app, "/api/v1/public/vehicles?search=hILUx").await;

    let json = body_json(response).await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["brand"], "Toyota");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_rejects_bad_parameters(pool: PgPool) {
    for uri in [
        "/api/v1/public/vehicles?limit=0",
        "/api/v1/public/vehicles?limit=101",
        "/api/v1/public/vehicles?page=0",
        "/api/v1/public/vehicles?year_min=2020&year_max=2010",
        "/api/v1/public/vehicles?price_min=-5",
        "/api/v1/public/vehicles?sort_by=color",
    ] {
        let app = common::build_test_app(pool.clone()).await;
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_summary_uses_principal_image(pool: PgPool) {
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, true).await;
    for name in ["front", "side"] {
        ImageRepo::create(
            &pool,
            &CreateVehicleImage {
                vehicle_id: vehicle.id,
                url: format!("/media/images/{name}.jpg"),
                public_id: Some(format!("images/{name}.jpg")),
                filename: Some(format!("{name}.jpg")),
            },
        )
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool).await;
    let response = get(app, "/api/v1/public/vehicles").await;

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["image"], "/media/images/front.jpg");
}

// ---------------------------------------------------------------------------
// Featured, filter options, detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_featured_only_returns_featured(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool).await;

    let response = get(app, "/api/v1/public/vehicles/featured").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["pagination"]["limit"], 6);
    assert_eq!(json["pagination"]["total"], 2);
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|v| v["featured"] == true));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_options(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool).await;

    let response = get(app, "/api/v1/public/vehicles/filter-options").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["brands"],
        serde_json::json!(["Fiat", "Toyota", "Volkswagen"])
    );
    assert_eq!(json["fuels"], serde_json::json!(["Nafta"]));
    assert_eq!(json["years"].as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_vehicle_detail(pool: PgPool) {
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, true).await;
    let app = common::build_test_app(pool).await;

    let response = get(app, &format!("/api/v1/public/vehicles/{}", vehicle.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], vehicle.id.to_string());
    assert_eq!(json["kind"], "auto");
    assert_eq!(json["price"], 25000.0);
    assert_eq!(json["fuel"], "Nafta");
    assert_eq!(json["abs"], false);
    assert_eq!(json["images"], serde_json::json!([]));
    assert_eq!(json["videos"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_vehicle_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = get(
        app,
        "/api/v1/public/vehicles/00000000-0000-4000-8000-000000000000",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

fn contact_body() -> serde_json::Value {
    serde_json::json!({
        "first_name": "Lucía",
        "last_name": "Pérez",
        "city": "Córdoba",
        "province": "Córdoba",
        "phone": "+54 351 555 1234",
        "email": "lucia@example.com",
        "message": "¿Sigue disponible el Corolla?",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_contact(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(app, "/api/v1/public/contacts", contact_body()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_string());
    assert_eq!(json["email"], "lucia@example.com");
    assert_eq!(ContactRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_contact_validation(pool: PgPool) {
    let mut body = contact_body();
    body["email"] = serde_json::json!("lucia-at-example");

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(app, "/api/v1/public/contacts", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ContactRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_contact_missing_field(pool: PgPool) {
    let mut body = contact_body();
    body.as_object_mut().unwrap().remove("message");

    let app = common::build_test_app(pool).await;
    let response = post_json(app, "/api/v1/public/contacts", body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_vehicle_sale(pool: PgPool) {
    let mut body = contact_body();
    let fields = body.as_object_mut().unwrap();
    fields.remove("message");
    fields.insert("vehicle_brand".into(), "Volkswagen".into());
    fields.insert("vehicle_model".into(), "Gol Trend".into());
    fields.insert("vehicle_year".into(), 2016.into());
    fields.insert("expected_price".into(), 6500000.into());

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(app, "/api/v1/public/vehicle-sales", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["processed"], false);
    assert_eq!(json["message"], serde_json::Value::Null);
    assert_eq!(VehicleSaleRepo::count_pending(&pool).await.unwrap(), 1);
}
