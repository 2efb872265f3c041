//! HTTP-level tests for the recommendation endpoints.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, get, get_auth, post_auth, post_json_auth, token_for};
use learnpath_db::models::course::CreateCourse;
use learnpath_db::models::user::CreateUser;
use learnpath_db::repositories::{
    CourseRepo, EnrollmentRepo, RecommendationRepo, SkillRepo, TagRepo, UserRepo,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Seeded {
    user_id: i64,
    completed: i64,
    close: i64,
    far: i64,
}

async fn create_course(
    pool: &PgPool,
    title: &str,
    difficulty: i32,
    popularity: i64,
    tag_ids: Vec<i64>,
) -> i64 {
    CourseRepo::create(
        pool,
        &CreateCourse {
            title: title.into(),
            difficulty: Some(difficulty),
            popularity: Some(popularity),
            learning_styles: Some(vec!["visual".into()]),
            is_published: None,
            tag_ids,
        },
    )
    .await
    .unwrap()
    .id
}

/// A visual learner at javascript 4 who already finished one course.
async fn seed(pool: &PgPool) -> Seeded {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "learner".into(),
            email: "learner@example.com".into(),
            learning_preferences: Some(json!({ "style": "visual", "pace": "moderate" })),
            interests: None,
        },
    )
    .await
    .unwrap();

    let js = TagRepo::create_or_get(pool, "javascript").await.unwrap();
    SkillRepo::upsert(pool, user.id, js.id, 4).await.unwrap();

    let completed = create_course(pool, "JS Basics", 4, 90, vec![js.id]).await;
    let close = create_course(pool, "JS Patterns", 5, 60, vec![js.id]).await;
    let far = create_course(pool, "Compilers", 9, 0, vec![]).await;

    EnrollmentRepo::mark_completed(pool, user.id, completed, Utc::now())
        .await
        .unwrap();

    Seeded {
        user_id: user.id,
        completed,
        close,
        far,
    }
}

fn course_ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]
        .as_array()
        .expect("data must be an array")
        .iter()
        .map(|r| r["course_id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_without_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/recommendations").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/recommendations", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Generate / list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_then_list(pool: PgPool) {
    let s = seed(&pool).await;
    let token = token_for(s.user_id);

    let response = post_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/recommendations/generate",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let generated = body_json(response).await;
    assert_eq!(course_ids(&generated), vec![s.close, s.far]);
    assert_eq!(
        generated["data"][0]["reason"],
        "Builds on your javascript skills"
    );
    assert_eq!(generated["data"][0]["course_title"], "JS Patterns");
    assert_eq!(generated["data"][0]["is_viewed"], false);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/recommendations?limit=1",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(course_ids(&listed), vec![s.close]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_accepts_options_body(pool: PgPool) {
    let s = seed(&pool).await;
    let token = token_for(s.user_id);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/recommendations/generate",
        json!({ "include_completed": true, "limit": 10 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(course_ids(&json).contains(&s.completed));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_returns_everything_it_stores_for_large_limits(pool: PgPool) {
    let s = seed(&pool).await;
    for i in 0..120 {
        create_course(&pool, &format!("Elective {i}"), 5, i, vec![]).await;
    }

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/recommendations/generate",
        json!({ "limit": 150 }),
        &token_for(s.user_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let returned = course_ids(&body_json(response).await);

    let stored_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM recommendations WHERE user_id = $1")
            .bind(s.user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(returned.len(), 100);
    assert_eq!(stored_count, 100);

    let listed = RecommendationRepo::list_for_user(&pool, s.user_id, Some(100))
        .await
        .unwrap();
    assert_eq!(
        listed.iter().map(|r| r.course_id).collect::<Vec<_>>(),
        returned
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_rejects_malformed_body(pool: PgPool) {
    let s = seed(&pool).await;
    let token = token_for(s.user_id);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/recommendations/generate",
        json!({ "limit": "lots" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_for_deleted_user_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/recommendations/generate", &token_for(424_242)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_empty_before_first_run(pool: PgPool) {
    let s = seed(&pool).await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/recommendations",
        &token_for(s.user_id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Viewed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_viewed_flags_the_row(pool: PgPool) {
    let s = seed(&pool).await;
    let token = token_for(s.user_id);

    post_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/recommendations/generate",
        &token,
    )
    .await;

    let response = post_auth(
        common::build_test_app(pool),
        &format!("/api/v1/recommendations/{}/viewed", s.close),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["course_id"], s.close);
    assert_eq!(json["data"]["is_viewed"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_viewed_without_recommendation_is_404(pool: PgPool) {
    let s = seed(&pool).await;

    let response = post_auth(
        common::build_test_app(pool),
        &format!("/api/v1/recommendations/{}/viewed", s.far),
        &token_for(s.user_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
