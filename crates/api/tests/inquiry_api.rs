//! HTTP-level tests for contact and vehicle-sale management in the dashboard.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, editor_token, get_auth, patch_auth};
use nextcar_db::models::contact::CreateContact;
use nextcar_db::models::vehicle_sale::CreateVehicleSale;
use nextcar_db::repositories::{ContactRepo, VehicleSaleRepo};
use sqlx::PgPool;

const MISSING_ID: &str = "00000000-0000-4000-8000-000000000000";

fn contact_input() -> CreateContact {
    CreateContact {
        first_name: "Lucía".into(),
        last_name: "Pérez".into(),
        city: "Córdoba".into(),
        province: "Córdoba".into(),
        phone: "+54 351 555 1234".into(),
        email: "lucia@example.com".into(),
        message: "¿Aceptan permuta?".into(),
    }
}

fn sale_input() -> CreateVehicleSale {
    CreateVehicleSale {
        first_name: "Martín".into(),
        last_name: "Gómez".into(),
        city: "Rosario".into(),
        province: "Santa Fe".into(),
        phone: "+54 341 555 9876".into(),
        email: "martin@example.com".into(),
        message: None,
        vehicle_brand: "Ford".into(),
        vehicle_model: "Ka".into(),
        vehicle_year: 2017,
        vehicle_mileage: Some("70000 km".into()),
        vehicle_fuel: None,
        vehicle_transmission: None,
        vehicle_description: None,
        expected_price: None,
    }
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_get_delete_contact(pool: PgPool) {
    let contact = ContactRepo::create(&pool, &contact_input()).await.unwrap();
    let token = editor_token(&pool).await;
    let uri = format!("/api/v1/dashboard/contacts/{}", contact.id);

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/dashboard/contacts", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "¿Aceptan permuta?");

    let app = common::build_test_app(pool.clone()).await;
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool).await;
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_contact_returns_404(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = common::build_test_app(pool).await;

    let response = get_auth(app, &format!("/api/v1/dashboard/contacts/{MISSING_ID}"), &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Vehicle sales
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_process_vehicle_sale(pool: PgPool) {
    let sale = VehicleSaleRepo::create(&pool, &sale_input()).await.unwrap();
    let token = editor_token(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = patch_auth(
        app,
        &format!("/api/v1/dashboard/vehicle-sales/{}/process", sale.id),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["processed"], true);
    assert_eq!(VehicleSaleRepo::count_pending(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vehicle_sale_not_found_paths(pool: PgPool) {
    let token = editor_token(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = patch_auth(
        app,
        &format!("/api/v1/dashboard/vehicle-sales/{MISSING_ID}/process"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool).await;
    let response = delete_auth(
        app,
        &format!("/api/v1/dashboard/vehicle-sales/{MISSING_ID}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_and_delete_vehicle_sales(pool: PgPool) {
    let sale = VehicleSaleRepo::create(&pool, &sale_input()).await.unwrap();
    let token = editor_token(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/dashboard/vehicle-sales", &token).await;
    let json = body_json(response).await;
    assert_eq!(json[0]["vehicle_brand"], "Ford");

    let app = common::build_test_app(pool.clone()).await;
    let response = delete_auth(
        app,
        &format!("/api/v1/dashboard/vehicle-sales/{}", sale.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(VehicleSaleRepo::find_by_id(&pool, sale.id).await.unwrap().is_none());
}
