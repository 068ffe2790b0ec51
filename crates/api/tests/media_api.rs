//! HTTP-level tests for image and video uploads and management.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, editor_token, get, get_auth, patch_auth, patch_json_auth,
    post_multipart_auth, seed_vehicle, FilePart,
};
use sqlx::PgPool;
use tempfile::TempDir;

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

fn image(filename: &str) -> FilePart<'_> {
    FilePart {
        field: "images",
        filename,
        content_type: "image/jpeg",
        data: JPEG_BYTES,
    }
}

/// Upload `names` as images and return the created rows.
async fn upload_images(
    pool: &PgPool,
    media: &TempDir,
    token: &str,
    vehicle_id: &str,
    names: &[&str],
) -> Vec<serde_json::Value> {
    let parts: Vec<FilePart<'_>> = names.iter().map(|n| image(n)).collect();
    let app = common::build_test_app_with_media(pool.clone(), media.path()).await;
    let response = post_multipart_auth(
        app,
        &format!("/api/v1/dashboard/vehicles/{vehicle_id}/images"),
        token,
        &parts,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_images_stores_files(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;

    let images = upload_images(&pool, &media, &token, &vehicle.id.to_string(), &["a.jpg", "b.JPG"]).await;

    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["is_principal"], true);
    assert_eq!(images[1]["is_principal"], false);
    assert_eq!(images[0]["filename"], "a.jpg");
    for image in &images {
        let public_id = image["public_id"].as_str().unwrap();
        assert!(public_id.starts_with("images/"));
        assert_eq!(image["url"], format!("/media/{public_id}"));
        assert!(media.path().join(public_id).exists());
    }

    // Stored files are served back under /media.
    let public_id = images[0]["public_id"].as_str().unwrap();
    let app = common::build_test_app_with_media(pool, media.path()).await;
    let response = get(app, &format!("/media/{public_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_bad_files(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;
    let uri = format!("/api/v1/dashboard/vehicles/{}/images", vehicle.id);

    let pdf = FilePart {
        field: "images",
        filename: "brochure.pdf",
        content_type: "application/pdf",
        data: b"%PDF-1.4",
    };
    let app = common::build_test_app_with_media(pool.clone(), media.path()).await;
    let response = post_multipart_auth(app, &uri, &token, &[pdf]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let wrong_field = FilePart {
        field: "file",
        ..image("a.jpg")
    };
    let app = common::build_test_app_with_media(pool.clone(), media.path()).await;
    let response = post_multipart_auth(app, &uri, &token, &[wrong_field]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let names: Vec<String> = (0..11).map(|i| format!("{i}.jpg")).collect();
    let too_many: Vec<FilePart<'_>> = names.iter().map(|n| image(n)).collect();
    let app = common::build_test_app_with_media(pool, media.path()).await;
    let response = post_multipart_auth(app, &uri, &token, &too_many).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(!media.path().join("images").exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_to_unknown_vehicle_returns_404(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let token = editor_token(&pool).await;

    let app = common::build_test_app_with_media(pool, media.path()).await;
    let response = post_multipart_auth(
        app,
        "/api/v1/dashboard/vehicles/00000000-0000-4000-8000-000000000000/images",
        &token,
        &[image("a.jpg")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_principal_and_list(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;
    let images = upload_images(&pool, &media, &token, &vehicle.id.to_string(), &["a.jpg", "b.jpg"]).await;
    let second = images[1]["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone()).await;
    let response = patch_auth(app, &format!("/api/v1/dashboard/images/{second}/principal"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_principal"], true);

    let app = common::build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/dashboard/vehicles/{}/images", vehicle.id),
        &token,
    )
    .await;
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed[0]["id"], second);
    assert_eq!(listed.iter().filter(|i| i["is_principal"] == true).count(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_principal_promotes_next_and_removes_file(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;
    let images = upload_images(&pool, &media, &token, &vehicle.id.to_string(), &["a.jpg", "b.jpg"]).await;
    let first_id = images[0]["id"].as_str().unwrap();
    let first_file = media.path().join(images[0]["public_id"].as_str().unwrap());

    let app = common::build_test_app_with_media(pool.clone(), media.path()).await;
    let response = delete_auth(app, &format!("/api/v1/dashboard/images/{first_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!first_file.exists());

    let app = common::build_test_app(pool).await;
    let response = get_auth(
        app,
        &format!("/api/v1/dashboard/images/{}", images[1]["id"].as_str().unwrap()),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["is_principal"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_images(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;
    let images = upload_images(&pool, &media, &token, &vehicle.id.to_string(), &["a.jpg", "b.jpg"]).await;

    let body = serde_json::json!({ "images": [
        { "id": images[0]["id"], "sort_order": 5 },
        { "id": images[1]["id"], "sort_order": 1 },
    ]});
    let app = common::build_test_app(pool.clone()).await;
    let response = patch_json_auth(app, "/api/v1/dashboard/images/order", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["sort_order"], 5);
    assert_eq!(json[1]["sort_order"], 1);

    // Unknown ids leave everything untouched.
    let body = serde_json::json!({ "images": [
        { "id": images[0]["id"], "sort_order": 9 },
        { "id": "00000000-0000-4000-8000-000000000000", "sort_order": 0 },
    ]});
    let app = common::build_test_app(pool.clone()).await;
    let response = patch_json_auth(app, "/api/v1/dashboard/images/order", &token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(
        app,
        &format!("/api/v1/dashboard/images/{}", images[0]["id"].as_str().unwrap()),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["sort_order"], 5);

    // Duplicates and empty batches are rejected up front.
    for body in [
        serde_json::json!({ "images": [] }),
        serde_json::json!({ "images": [
            { "id": images[0]["id"], "sort_order": 1 },
            { "id": images[0]["id"], "sort_order": 2 },
        ]}),
    ] {
        let app = common::build_test_app(pool.clone()).await;
        let response = patch_json_auth(app, "/api/v1/dashboard/images/order", &token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_vehicle_removes_stored_media(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;
    let images = upload_images(&pool, &media, &token, &vehicle.id.to_string(), &["a.jpg"]).await;
    let file = media.path().join(images[0]["public_id"].as_str().unwrap());
    assert!(file.exists());

    let app = common::build_test_app_with_media(pool, media.path()).await;
    let response = delete_auth(app, &format!("/api/v1/dashboard/vehicles/{}", vehicle.id), &token).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!file.exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_highlight_returns_vehicle_with_images(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;
    let images = upload_images(&pool, &media, &token, &vehicle.id.to_string(), &["a.jpg", "b.jpg"]).await;

    let app = common::build_test_app_with_media(pool, media.path()).await;
    let response = patch_json_auth(
        app,
        &format!("/api/v1/dashboard/vehicles/{}/highlight", vehicle.id),
        &token,
        serde_json::json!({ "featured": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["featured"], true);
    let returned = json["images"].as_array().unwrap();
    assert_eq!(returned.len(), 2);
    assert_eq!(returned[0]["id"], images[0]["id"]);
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_upload_list_delete(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;

    let clip = FilePart {
        field: "videos",
        filename: "walkaround.mp4",
        content_type: "video/mp4",
        data: b"\x00\x00\x00\x18ftypmp42",
    };
    let app = common::build_test_app_with_media(pool.clone(), media.path()).await;
    let response = post_multipart_auth(
        app,
        &format!("/api/v1/dashboard/vehicles/{}/videos", vehicle.id),
        &token,
        &[clip],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let video = &json["data"][0];
    let video_id = video["id"].as_str().unwrap().to_string();
    let file = media.path().join(video["public_id"].as_str().unwrap());
    assert!(file.exists());

    let app = common::build_test_app(pool.clone()).await;
    let response = get_auth(app, "/api/v1/dashboard/videos", &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let app = common::build_test_app_with_media(pool.clone(), media.path()).await;
    let response = delete_auth(app, &format!("/api/v1/dashboard/videos/{video_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!file.exists());

    let app = common::build_test_app(pool).await;
    let response = get_auth(app, &format!("/api/v1/dashboard/videos/{video_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_rejects_image_file(pool: PgPool) {
    let media = TempDir::new().unwrap();
    let vehicle = seed_vehicle(&pool, "Corolla", "Toyota", 2020, 25_000, false).await;
    let token = editor_token(&pool).await;

    let wrong = FilePart {
        field: "videos",
        ..image("a.jpg")
    };
    let app = common::build_test_app_with_media(pool, media.path()).await;
    let response = post_multipart_auth(
        app,
        &format!("/api/v1/dashboard/vehicles/{}/videos", vehicle.id),
        &token,
        &[wrong],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
