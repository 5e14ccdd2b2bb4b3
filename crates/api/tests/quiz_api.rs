//! Integration tests for quiz authoring, the player view, grading and
//! dashboard progress.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, post_json_auth, put_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

/// A published free course with one two-question quiz.
///
/// Returns `(course_id, quiz_id, [question ids], instructor token)`.
async fn seed_quiz(pool: &PgPool) -> (i64, i64, [i64; 2], String) {
    let (_, token) = create_user(pool, "quizmaster@college.edu", "instructor").await;

    let course = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/courses",
            json!({ "title": "Military History" }),
            &token,
        )
        .await,
    )
    .await;
    let course_id = course["data"]["id"].as_i64().unwrap();

    let quiz = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/quizzes"),
        json!({ "title": "Week 1" }),
        &token,
    )
    .await;
    assert_eq!(quiz.status(), StatusCode::CREATED);
    let quiz_id = body_json(quiz).await["data"]["id"].as_i64().unwrap();

    let mut ids = [0; 2];
    let questions = [
        ("Year the college was founded?", vec!["1964", "1978", "1990"], 1),
        ("Who commands a platoon?", vec!["Lieutenant", "Major"], 0),
    ];
    for (i, (prompt, options, correct)) in questions.into_iter().enumerate() {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/quizzes/{quiz_id}/questions"),
            json!({ "prompt": prompt, "options": options, "correct_option_index": correct }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        ids[i] = body_json(response).await["data"]["id"].as_i64().unwrap();
    }

    (course_id, quiz_id, ids, token)
}

async fn enroll(pool: &PgPool, course_id: i64, token: &str) {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/enroll"),
        json!({}),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn submit(pool: &PgPool, quiz_id: i64, answers: Value, token: &str) -> axum::response::Response {
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quizzes/{quiz_id}/submissions"),
        json!({ "answers": answers }),
        token,
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn authored_questions_are_keyed_by_position(pool: PgPool) {
    let (_, quiz_id, _, token) = seed_quiz(&pool).await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let first = &json["data"][0];
    assert_eq!(first["correct_option"], "b");
    assert_eq!(first["options"][0], json!({ "key": "a", "text": "1964" }));
    assert_eq!(first["options"][2]["key"], "c");
    assert_eq!(json["data"][1]["correct_option"], "a");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unpositioned_questions_go_last(pool: PgPool) {
    let (_, quiz_id, _, token) = seed_quiz(&pool).await;
    let uri = format!("/api/v1/quizzes/{quiz_id}/questions");

    let pinned = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "prompt": "Pinned", "options": ["x", "y"], "correct_option_index": 0, "position": 7 }),
        &token,
    )
    .await;
    assert_eq!(body_json(pinned).await["data"]["position"], 7);

    let appended = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "prompt": "Appended", "options": ["x", "y"], "correct_option_index": 1 }),
        &token,
    )
    .await;
    assert_eq!(appended.status(), StatusCode::CREATED);
    assert_eq!(body_json(appended).await["data"]["position"], 8);

    let listed = body_json(get_auth(common::build_test_app(pool), &uri, &token).await).await;
    let positions: Vec<i64> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![0, 1, 7, 8]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn questions_need_at_least_two_options(pool: PgPool) {
    let (_, quiz_id, _, token) = seed_quiz(&pool).await;

    let too_few = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        json!({ "prompt": "Lonely", "options": ["only"], "correct_option_index": 0 }),
        &token,
    )
    .await;
    assert_eq!(too_few.status(), StatusCode::BAD_REQUEST);

    let out_of_range = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        json!({ "prompt": "Pick", "options": ["x", "y"], "correct_option_index": 2 }),
        &token,
    )
    .await;
    assert_eq!(out_of_range.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn player_view_requires_access_and_hides_answers(pool: PgPool) {
    let (course_id, quiz_id, _, _) = seed_quiz(&pool).await;
    let (_, student_token) = create_user(&pool, "cadet@college.edu", "student").await;

    let locked = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quizzes/{quiz_id}"),
        &student_token,
    )
    .await;
    assert_eq!(locked.status(), StatusCode::FORBIDDEN);

    enroll(&pool, course_id, &student_token).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quizzes/{quiz_id}"),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Week 1");
    let questions = json["data"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert!(questions.iter().all(|q| q.get("correct_option").is_none()));

    let authoring = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/quizzes/{quiz_id}/questions"),
        &student_token,
    )
    .await;
    assert_eq!(authoring.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn incomplete_submission_is_rejected_without_storing(pool: PgPool) {
    let (course_id, quiz_id, [first, _], _) = seed_quiz(&pool).await;
    let (_, token) = create_user(&pool, "hasty@college.edu", "student").await;
    enroll(&pool, course_id, &token).await;

    let response = submit(&pool, quiz_id, json!({ first.to_string(): "b" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("(1/2 answered)"));

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_submissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submissions_are_graded_and_reviewed(pool: PgPool) {
    let (course_id, quiz_id, [first, second], _) = seed_quiz(&pool).await;
    let (_, token) = create_user(&pool, "scholar@college.edu", "student").await;
    enroll(&pool, course_id, &token).await;

    let response = submit(
        &pool,
        quiz_id,
        json!({ first.to_string(): "b", second.to_string(): "b" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["score"], 50);
    assert_eq!(data["passed"], false);
    assert_eq!(data["correct"], 1);
    assert_eq!(data["total"], 2);

    let wrong = &data["review"][1];
    assert_eq!(wrong["is_correct"], false);
    assert_eq!(wrong["options"][0]["mark"], "correct");
    assert_eq!(wrong["options"][1]["mark"], "incorrect_selection");

    let retry = submit(
        &pool,
        quiz_id,
        json!({ first.to_string(): "b", second.to_string(): "a" }),
        &token,
    )
    .await;
    assert_eq!(retry.status(), StatusCode::CREATED);

    let latest = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/quizzes/{quiz_id}/submissions/latest"),
        &token,
    )
    .await;
    assert_eq!(latest.status(), StatusCode::OK);
    let json = body_json(latest).await;
    assert_eq!(json["data"]["score"], 100);
    assert_eq!(json["data"]["passed"], true);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_submissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn latest_submission_is_404_before_any_attempt(pool: PgPool) {
    let (course_id, quiz_id, _, _) = seed_quiz(&pool).await;
    let (_, token) = create_user(&pool, "fresh@college.edu", "student").await;
    enroll(&pool, course_id, &token).await;

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/quizzes/{quiz_id}/submissions/latest"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_counts_best_attempt_per_quiz(pool: PgPool) {
    let (course_id, quiz_id, [first, second], author_token) = seed_quiz(&pool).await;
    let (_, token) = create_user(&pool, "progress@college.edu", "student").await;
    enroll(&pool, course_id, &token).await;

    let second_quiz = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/courses/{course_id}/quizzes"),
        json!({ "title": "Week 2" }),
        &author_token,
    )
    .await;
    assert_eq!(second_quiz.status(), StatusCode::CREATED);

    let before = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/v1/dashboard/progress", &token).await,
    )
    .await;
    assert_eq!(before["data"][0]["course_id"], course_id);
    assert_eq!(before["data"][0]["passed"], 0);
    assert_eq!(before["data"][0]["total"], 2);

    let passing = json!({ first.to_string(): "b", second.to_string(): "a" });
    let failing = json!({ first.to_string(): "a", second.to_string(): "b" });
    submit(&pool, quiz_id, passing, &token).await;
    submit(&pool, quiz_id, failing, &token).await;

    let after = body_json(
        get_auth(common::build_test_app(pool), "/api/v1/dashboard/progress", &token).await,
    )
    .await;
    assert_eq!(after["data"][0]["title"], "Military History");
    assert_eq!(after["data"][0]["passed"], 1);
    assert_eq!(after["data"][0]["total"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replacing_options_requires_a_correct_index(pool: PgPool) {
    let (_, quiz_id, [first, _], token) = seed_quiz(&pool).await;

    let missing_index = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/questions/{first}"),
        json!({ "options": ["1964", "1978"] }),
        &token,
    )
    .await;
    assert_eq!(missing_index.status(), StatusCode::BAD_REQUEST);

    let updated = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/questions/{first}"),
        json!({ "options": ["1964", "1978"], "correct_option_index": 0 }),
        &token,
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let json = body_json(updated).await;
    assert_eq!(json["data"]["correct_option"], "a");
    assert_eq!(json["data"]["options"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["quiz_id"], quiz_id);
}
