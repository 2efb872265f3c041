//! Integration tests for the all-users recommendation sweep.

use chrono::{Duration, Utc};
use learnpath_db::models::course::CreateCourse;
use learnpath_db::models::user::CreateUser;
use learnpath_db::repositories::{CourseRepo, EnrollmentRepo, RecommendationRepo, UserRepo};
use learnpath_recommender::batch::process_users;
use learnpath_recommender::{generate_recommendations_for_all_users, BatchSummary, RecommenderConfig};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            learning_preferences: None,
            interests: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_course(pool: &PgPool, title: &str) -> i64 {
    CourseRepo::create(
        pool,
        &CreateCourse {
            title: title.to_string(),
            difficulty: Some(5),
            popularity: Some(20),
            learning_styles: None,
            is_published: None,
            tag_ids: vec![],
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_covers_only_recently_active_users(pool: PgPool) {
    let active = seed_user(&pool, "active").await;
    let dormant = seed_user(&pool, "dormant").await;
    let course = seed_course(&pool, "Course").await;
    seed_course(&pool, "Other").await;

    let lesson = EnrollmentRepo::create_lesson(&pool, course, "Lesson", 1)
        .await
        .unwrap();
    EnrollmentRepo::record_lesson_completion(&pool, active, lesson.id, Utc::now())
        .await
        .unwrap();
    EnrollmentRepo::record_lesson_completion(
        &pool,
        dormant,
        lesson.id,
        Utc::now() - Duration::days(60),
    )
    .await
    .unwrap();

    let summary = generate_recommendations_for_all_users(&pool, &RecommenderConfig::default())
        .await
        .unwrap();
    assert_eq!(
        summary,
        BatchSummary {
            active_users: 1,
            stored: 1,
            empty: 0,
            failed: 0,
        }
    );

    let for_active = RecommendationRepo::list_for_user(&pool, active, None)
        .await
        .unwrap();
    assert_eq!(for_active.len(), 2);

    let for_dormant = RecommendationRepo::list_for_user(&pool, dormant, None)
        .await
        .unwrap();
    assert!(for_dormant.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_failing_user_does_not_abort_the_sweep(pool: PgPool) {
    let first = seed_user(&pool, "first").await;
    let last = seed_user(&pool, "last").await;
    seed_course(&pool, "Course").await;

    let missing_user = last + 1_000;
    let summary =
        process_users(&pool, &[first, missing_user, last], &RecommenderConfig::default()).await;

    assert_eq!(summary.active_users, 3);
    assert_eq!(summary.stored, 2);
    assert_eq!(summary.failed, 1);

    for user in [first, last] {
        let stored = RecommendationRepo::list_for_user(&pool, user, None)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_with_nothing_eligible_keeps_previous_set(pool: PgPool) {
    let user = seed_user(&pool, "finisher").await;
    let course = seed_course(&pool, "Only").await;

    let config = RecommenderConfig::default();
    let summary = process_users(&pool, &[user], &config).await;
    assert_eq!(summary.stored, 1);

    EnrollmentRepo::mark_completed(&pool, user, course, Utc::now())
        .await
        .unwrap();

    let summary = process_users(&pool, &[user], &config).await;
    assert_eq!(summary.empty, 1);

    let stored = RecommendationRepo::list_for_user(&pool, user, None)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1, "empty run must not clear the stored set");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_with_no_active_users_is_empty(pool: PgPool) {
    seed_user(&pool, "nobody").await;

    let summary = generate_recommendations_for_all_users(&pool, &RecommenderConfig::default())
        .await
        .unwrap();
    assert_eq!(summary, BatchSummary::default());
}
