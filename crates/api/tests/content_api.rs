//! Integration tests for the public content pages, site settings,
//! student categories and the admin analytics overview.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, delete_auth, get, get_auth, post_json_auth, put_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn drafts_are_hidden_from_the_public(pool: PgPool) {
    let (_, admin) = create_user(&pool, "editor@college.edu", "admin").await;

    for (title, published) in [("Passing out parade", true), ("Embargoed", false)] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/news",
            json!({ "title": title, "body": "Details to follow.", "is_published": published }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let public = body_json(get(common::build_test_app(pool.clone()), "/api/v1/news").await).await;
    let public = public["data"].as_array().unwrap().clone();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0]["title"], "Passing out parade");

    let admin_view =
        body_json(get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/news", &admin).await)
            .await;
    assert_eq!(admin_view["data"].as_array().unwrap().len(), 2);

    let draft_id = admin_view["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["title"] == "Embargoed")
        .unwrap()["id"]
        .as_i64()
        .unwrap();
    let hidden = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/news/{draft_id}"),
    )
    .await;
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    let published = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/news/{draft_id}"),
        json!({ "is_published": true }),
        &admin,
    )
    .await;
    assert_eq!(published.status(), StatusCode::OK);

    let visible = get(
        common::build_test_app(pool),
        &format!("/api/v1/news/{draft_id}"),
    )
    .await;
    assert_eq!(visible.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn content_management_is_admin_only(pool: PgPool) {
    let (_, instructor) = create_user(&pool, "notadmin@college.edu", "instructor").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/news",
        json!({ "title": "Unauthorised", "body": "..." }),
        &instructor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let anonymous = common::post_json(
        common::build_test_app(pool),
        "/api/v1/admin/gallery/pictures",
        json!({ "title": "Sneaky", "image_url": "/storage/gallery/x.png" }),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn content_validation_rejects_bad_input(pool: PgPool) {
    let (_, admin) = create_user(&pool, "strict@college.edu", "admin").await;

    let blank_title = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/news",
        json!({ "title": "   ", "body": "..." }),
        &admin,
    )
    .await;
    assert_eq!(blank_title.status(), StatusCode::BAD_REQUEST);

    let negative_order = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/admin/gallery/videos",
        json!({ "title": "Drill", "video_url": "https://video.test/1", "display_order": -1 }),
        &admin,
    )
    .await;
    assert_eq!(negative_order.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gallery_lists_featured_items_first(pool: PgPool) {
    let (_, admin) = create_user(&pool, "curator@college.edu", "admin").await;

    for (title, featured, order) in [("Range day", false, 0), ("Graduation", true, 5)] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/gallery/pictures",
            json!({
                "title": title,
                "image_url": format!("/storage/gallery/{order}.jpg"),
                "is_featured": featured,
                "display_order": order,
            }),
            &admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(common::build_test_app(pool.clone()), "/api/v1/gallery/pictures").await)
        .await;
    assert_eq!(json["data"][0]["title"], "Graduation");
    assert_eq!(json["data"][1]["title"], "Range day");

    let id = json["data"][1]["id"].as_i64().unwrap();
    let deleted = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/gallery/pictures/{id}"),
        &admin,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = get(
        common::build_test_app(pool),
        &format!("/api/v1/gallery/pictures/{id}"),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn settings_are_public_to_read_and_admin_to_write(pool: PgPool) {
    let (_, admin) = create_user(&pool, "settings@college.edu", "admin").await;
    let (_, student) = create_user(&pool, "reader@college.edu", "student").await;

    let missing = get(common::build_test_app(pool.clone()), "/api/v1/settings/homepage").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let forbidden = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/settings/homepage",
        json!({ "value": { "headline": "Hacked" } }),
        &student,
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let null_value = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/settings/homepage",
        json!({ "value": null }),
        &admin,
    )
    .await;
    assert_eq!(null_value.status(), StatusCode::BAD_REQUEST);

    for headline in ["Welcome", "Welcome, cadets"] {
        let saved = put_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/settings/homepage",
            json!({ "value": { "headline": headline } }),
            &admin,
        )
        .await;
        assert_eq!(saved.status(), StatusCode::OK);
    }

    let read = body_json(get(common::build_test_app(pool.clone()), "/api/v1/settings/homepage").await)
        .await;
    assert_eq!(read["data"]["value"]["headline"], "Welcome, cadets");

    let all = body_json(get_auth(common::build_test_app(pool), "/api/v1/admin/settings", &admin).await)
        .await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_categories_are_unique_by_name(pool: PgPool) {
    let (_, admin) = create_user(&pool, "dean@college.edu", "admin").await;

    let created = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/categories",
        json!({ "name": "Regular", "description": "Full-time cadets" }),
        &admin,
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/categories",
        json!({ "name": "Regular" }),
        &admin,
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let listed = body_json(get(common::build_test_app(pool), "/api/v1/categories").await).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed["data"][0]["description"], "Full-time cadets");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn analytics_overview_counts_portal_activity(pool: PgPool) {
    let (_, admin) = create_user(&pool, "stats@college.edu", "admin").await;
    let (_, lecturer) = create_user(&pool, "counted@college.edu", "instructor").await;
    let (_, student) = create_user(&pool, "enrolled@college.edu", "student").await;
    create_user(&pool, "idle@college.edu", "student").await;

    let course = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/courses",
            json!({ "title": "Counting" }),
            &lecturer,
        )
        .await,
    )
    .await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{}/enroll", course["data"]["id"]),
        json!({}),
        &student,
    )
    .await;

    let forbidden = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/analytics", &lecturer)
        .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let response = get_auth(common::build_test_app(pool), "/api/v1/admin/analytics", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["students"], 2);
    assert_eq!(data["instructors"], 1);
    assert_eq!(data["courses"], 1);
    assert_eq!(data["active_enrollments"], 1);
    assert_eq!(data["quiz_submissions"], 0);
    assert!(data["average_score"].is_null());
    assert_eq!(data["revenue_minor"], 0);
    assert!(data["recent_activity"].is_array());
}
