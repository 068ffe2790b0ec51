#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use nextcar_api::auth::jwt::JwtConfig;
use nextcar_api::auth::password::hash_password;
use nextcar_api::config::ServerConfig;
use nextcar_api::router::build_app_router;
use nextcar_api::state::AppState;
use nextcar_api::storage::LocalMediaStore;
use nextcar_db::models::user::{CreateUser, User};
use nextcar_db::models::vehicle::{CreateVehicle, Vehicle, VehicleSpecs};
use nextcar_db::repositories::{UserRepo, VehicleRepo};
use rust_decimal::Decimal;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

const MULTIPART_BOUNDARY: &str = "nextcar-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and a fixed JWT secret.
pub fn test_config(media_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_env: "test".to_string(),
        frontend_url: "http://localhost:3000".to_string(),
        media_root: media_root.to_path_buf(),
        media_base_url: "/media".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router using the given database pool.
///
/// Media goes to a scratch directory under the system temp dir; tests that
/// inspect stored files use [`build_test_app_with_media`] instead.
pub async fn build_test_app(pool: PgPool) -> Router {
    let root: PathBuf = std::env::temp_dir().join("nextcar-api-tests");
    build_test_app_with_media(pool, &root).await
}

/// Build the full application router with media stored under `media_root`.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses. No mailer is configured.
pub async fn build_test_app_with_media(pool: PgPool, media_root: &Path) -> Router {
    let config = test_config(media_root);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: Arc::new(LocalMediaStore::new(media_root, config.media_base_url.clone())),
        mailer: None,
        started_at: Instant::now(),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] directly in the database.
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: Some(format!("{username}@nextcar.test")),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: Some(role.to_string()),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(pool: &PgPool, username: &str) -> String {
    let app = build_test_app(pool.clone()).await;
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}

/// Create an admin user and return a token for it.
pub async fn admin_token(pool: &PgPool) -> String {
    create_user(pool, "admin", "admin").await;
    login(pool, "admin").await
}

/// Create an editor user and return a token for it.
pub async fn editor_token(pool: &PgPool) -> String {
    create_user(pool, "editor", "editor").await;
    login(pool, "editor").await
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// A minimal valid vehicle payload.
pub fn vehicle_input(name: &str, brand: &str, year: i32, price: i64, featured: bool) -> CreateVehicle {
    CreateVehicle {
        name: name.to_string(),
        brand: brand.to_string(),
        model: name.to_string(),
        kind: None,
        year,
        price: Decimal::from(price),
        description: format!("{brand} {name} en excelente estado"),
        featured: Some(featured),
        mileage: Some("50000 km".to_string()),
        notes: None,
        specs: VehicleSpecs {
            fuel: Some("Nafta".to_string()),
            transmission: Some("Manual".to_string()),
            ..Default::default()
        },
        equipment: Default::default(),
    }
}

/// Insert a vehicle directly in the database.
pub async fn seed_vehicle(
    pool: &PgPool,
    name: &str,
    brand: &str,
    year: i32,
    price: i64,
    featured: bool,
) -> Vehicle {
    VehicleRepo::create(pool, &vehicle_input(name, brand, year, price, featured))
        .await
        .expect("vehicle creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should not fail")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::PATCH, uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// One file part of a multipart upload.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

/// POST a `multipart/form-data` body made of `parts`.
pub async fn post_multipart_auth(app: Router, uri: &str, token: &str, parts: &[FilePart<'_>]) -> Response {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, part.filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
