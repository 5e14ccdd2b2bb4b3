//! Integration tests for courses, lessons and enrollments.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

use campus_db::repositories::EnrollmentRepo;

async fn create_course(pool: &PgPool, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/v1/courses", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_authoring_is_role_and_owner_checked(pool: PgPool) {
    let (instructor, token) = create_user(&pool, "author@college.edu", "instructor").await;
    let (_, other_token) = create_user(&pool, "other@college.edu", "instructor").await;
    let (_, student_token) = create_user(&pool, "learner@college.edu", "student").await;

    let forbidden = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/courses",
        json!({ "title": "Sneaky" }),
        &student_token,
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let course = create_course(&pool, &token, json!({ "title": "Introduction to Drill" })).await;
    assert_eq!(course["instructor_id"], instructor.id);
    assert_eq!(course["is_paid"], false);
    assert_eq!(course["currency"], "NGN");

    let not_owner = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{}", course["id"]),
        json!({ "title": "Taken over" }),
        &other_token,
    )
    .await;
    assert_eq!(not_owner.status(), StatusCode::FORBIDDEN);

    let updated = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{}", course["id"]),
        json!({ "description": "Foot drill basics" }),
        &token,
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["description"], "Foot drill basics");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pricing_rules_are_enforced(pool: PgPool) {
    let (_, token) = create_user(&pool, "pricing@college.edu", "instructor").await;

    let missing_price = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/courses",
        json!({ "title": "Paid", "is_paid": true }),
        &token,
    )
    .await;
    assert_eq!(missing_price.status(), StatusCode::BAD_REQUEST);

    let course = create_course(
        &pool,
        &token,
        json!({ "title": "Paid", "is_paid": true, "price_minor": 500_000 }),
    )
    .await;
    assert_eq!(course["price_minor"], 500_000);

    let made_free = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{}", course["id"]),
        json!({ "is_paid": false }),
        &token,
    )
    .await;
    assert_eq!(made_free.status(), StatusCode::OK);
    let json = body_json(made_free).await;
    assert_eq!(json["data"]["is_paid"], false);
    assert!(json["data"]["price_minor"].is_null());

    let paid_again_without_price = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{}", course["id"]),
        json!({ "is_paid": true }),
        &token,
    )
    .await;
    assert_eq!(paid_again_without_price.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalogue_hides_unpublished_and_filters_by_category(pool: PgPool) {
    let (_, token) = create_user(&pool, "catalogue@college.edu", "instructor").await;
    create_course(&pool, &token, json!({ "title": "Draft", "is_published": false })).await;
    create_course(&pool, &token, json!({ "title": "Tactics", "category": "military" })).await;
    create_course(&pool, &token, json!({ "title": "Calculus", "category": "science" })).await;

    let all = body_json(get(common::build_test_app(pool.clone()), "/api/v1/courses").await).await;
    let titles: Vec<&str> = all["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(!titles.contains(&"Draft"));

    let science = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/courses?category=science").await,
    )
    .await;
    assert_eq!(science["data"].as_array().unwrap().len(), 1);
    assert_eq!(science["data"][0]["title"], "Calculus");

    let draft = create_course(&pool, &token, json!({ "title": "Hidden", "is_published": false })).await;
    let uri = format!("/api/v1/courses/{}", draft["id"]);

    let anonymous = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let owner = get_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(owner.status(), StatusCode::OK);

    let bad_token = get_auth(common::build_test_app(pool), &uri, "garbage").await;
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lessons_require_enrollment(pool: PgPool) {
    let (_, author_token) = create_user(&pool, "lessons@college.edu", "instructor").await;
    let (student, student_token) = create_user(&pool, "pupil@college.edu", "student").await;
    let course = create_course(&pool, &author_token, json!({ "title": "Map Reading" })).await;
    let course_id = course["id"].as_i64().unwrap();

    for (title, position) in [("Contours", 2), ("Grid references", 1)] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/courses/{course_id}/lessons"),
            json!({ "title": title, "position": position }),
            &author_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let locked = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/lessons"),
        &student_token,
    )
    .await;
    assert_eq!(locked.status(), StatusCode::FORBIDDEN);

    let enrolled = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/enroll"),
        json!({}),
        &student_token,
    )
    .await;
    assert_eq!(enrolled.status(), StatusCode::CREATED);
    let enrollment = body_json(enrolled).await;
    assert_eq!(enrollment["data"]["payment_status"], "free");
    assert_eq!(enrollment["data"]["access_state"], "active");

    let again = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/enroll"),
        json!({}),
        &student_token,
    )
    .await;
    assert_eq!(again.status(), StatusCode::OK);
    assert_eq!(body_json(again).await["data"]["id"], enrollment["data"]["id"]);

    let lessons = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/lessons"),
        &student_token,
    )
    .await;
    assert_eq!(lessons.status(), StatusCode::OK);
    let json = body_json(lessons).await;
    assert_eq!(json["data"][0]["title"], "Grid references");
    assert_eq!(json["data"][1]["title"], "Contours");

    let mine = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/v1/enrollments/me", &student_token).await,
    )
    .await;
    assert_eq!(mine["data"][0]["course_title"], "Map Reading");

    assert!(EnrollmentRepo::has_active_access(&pool, student.id, course_id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn paid_courses_cannot_be_enrolled_directly(pool: PgPool) {
    let (_, author_token) = create_user(&pool, "paidauthor@college.edu", "instructor").await;
    let (_, student_token) = create_user(&pool, "paidpupil@college.edu", "student").await;
    let course = create_course(
        &pool,
        &author_token,
        json!({ "title": "Staff Duties", "is_paid": true, "price_minor": 250_000 }),
    )
    .await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{}/enroll", course["id"]),
        json!({}),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_grants_and_revokes_access(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "registrar@college.edu", "admin").await;
    let (_, author_token) = create_user(&pool, "grant@college.edu", "instructor").await;
    let (student, student_token) = create_user(&pool, "grantee@college.edu", "student").await;
    let course = create_course(
        &pool,
        &author_token,
        json!({ "title": "Leadership", "is_paid": true, "price_minor": 100_000 }),
    )
    .await;
    let course_id = course["id"].as_i64().unwrap();

    let granted = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/enrollments",
        json!({ "student_id": student.id, "course_id": course_id }),
        &admin_token,
    )
    .await;
    assert_eq!(granted.status(), StatusCode::CREATED);
    let enrollment = body_json(granted).await["data"].clone();
    assert_eq!(enrollment["payment_status"], "waived");

    let revoked = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/enrollments/{}/access", enrollment["id"]),
        json!({ "access_state": "revoked" }),
        &admin_token,
    )
    .await;
    assert_eq!(revoked.status(), StatusCode::OK);

    let locked = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/lessons"),
        &student_token,
    )
    .await;
    assert_eq!(locked.status(), StatusCode::FORBIDDEN);

    let invalid = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/enrollments/{}/access", enrollment["id"]),
        json!({ "access_state": "paused" }),
        &admin_token,
    )
    .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let reactivated = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/enrollments",
        json!({ "student_id": student.id, "course_id": course_id }),
        &admin_token,
    )
    .await;
    assert_eq!(reactivated.status(), StatusCode::OK);
    assert_eq!(body_json(reactivated).await["data"]["access_state"], "active");

    let roster = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/admin/courses/{course_id}/enrollments"),
        &author_token,
    )
    .await;
    assert_eq!(roster.status(), StatusCode::OK);
    assert_eq!(body_json(roster).await["data"][0]["student_email"], "grantee@college.edu");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_course_removes_it(pool: PgPool) {
    let (_, token) = create_user(&pool, "deleter@college.edu", "instructor").await;
    let course = create_course(&pool, &token, json!({ "title": "Short lived" })).await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{}", course["id"]),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let missing = get(
        common::build_test_app(pool),
        &format!("/api/v1/courses/{}", course["id"]),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(missing).await["code"], "NOT_FOUND");
}
