//! Integration tests for admin uploads and the public storage mount.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, build_test_app_with, create_user, delete_auth, send, test_config};
use http_body_util::BodyExt;
use sqlx::PgPool;

const BOUNDARY: &str = "campus-test-boundary";

fn multipart_request(uri: &str, token: &str, field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn uploaded_files_are_served_from_storage(pool: PgPool) {
    let config = test_config();
    let (_, admin) = create_user(&pool, "uploader@college.edu", "admin").await;
    let png = b"\x89PNG\r\n\x1a\nfake image bytes";

    let response = send(
        build_test_app_with(pool.clone(), config.clone()),
        multipart_request("/api/v1/admin/uploads/images", &admin, "file", "Crest.PNG", png),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let key = json["data"]["key"].as_str().unwrap().to_string();
    let url = json["data"]["url"].as_str().unwrap().to_string();
    assert!(key.ends_with(".png"));
    assert_eq!(url, format!("/storage/images/{key}"));

    let served = send(
        build_test_app_with(pool.clone(), config.clone()),
        Request::get(url.as_str()).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(served.status(), StatusCode::OK);
    let bytes = served.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], &png[..]);

    let deleted = delete_auth(
        build_test_app_with(pool.clone(), config.clone()),
        &format!("/api/v1/admin/uploads/images/{key}"),
        &admin,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = send(
        build_test_app_with(pool, config),
        Request::get(url.as_str()).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn uploads_are_validated_per_bucket(pool: PgPool) {
    let config = test_config();
    let (_, admin) = create_user(&pool, "checker@college.edu", "admin").await;

    let wrong_type = send(
        build_test_app_with(pool.clone(), config.clone()),
        multipart_request("/api/v1/admin/uploads/documents", &admin, "file", "notes.docx", b"data"),
    )
    .await;
    assert_eq!(wrong_type.status(), StatusCode::BAD_REQUEST);

    let unknown_bucket = send(
        build_test_app_with(pool.clone(), config.clone()),
        multipart_request("/api/v1/admin/uploads/secrets", &admin, "file", "a.png", b"data"),
    )
    .await;
    assert_eq!(unknown_bucket.status(), StatusCode::BAD_REQUEST);

    let missing_field = send(
        build_test_app_with(pool.clone(), config.clone()),
        multipart_request("/api/v1/admin/uploads/images", &admin, "attachment", "a.png", b"data"),
    )
    .await;
    assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);

    let empty = send(
        build_test_app_with(pool, config),
        multipart_request("/api/v1/admin/uploads/images", &admin, "file", "a.png", b""),
    )
    .await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn uploads_require_admin(pool: PgPool) {
    let (_, student) = create_user(&pool, "sneaky@college.edu", "student").await;

    let response = send(
        build_test_app_with(pool, test_config()),
        multipart_request("/api/v1/admin/uploads/images", &student, "file", "a.png", b"data"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
