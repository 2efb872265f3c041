//! Loop-level behaviour of the recommendation sweep job.

use std::time::Duration;

use chrono::Utc;
use learnpath_db::models::course::CreateCourse;
use learnpath_db::models::user::CreateUser;
use learnpath_db::repositories::{CourseRepo, EnrollmentRepo, RecommendationRepo, UserRepo};
use learnpath_recommender::RecommenderConfig;
use learnpath_worker::sweep;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// One learner with a lesson completed just now, plus a second course to
/// recommend. Returns the learner's id.
async fn seed_active_learner(pool: &PgPool) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "sweeper".into(),
            email: "sweeper@example.com".into(),
            learning_preferences: None,
            interests: None,
        },
    )
    .await
    .unwrap();

    let mut course_ids = Vec::new();
    for title in ["Started", "Next"] {
        let course = CourseRepo::create(
            pool,
            &CreateCourse {
                title: title.into(),
                difficulty: Some(5),
                popularity: Some(10),
                learning_styles: None,
                is_published: None,
                tag_ids: vec![],
            },
        )
        .await
        .unwrap();
        course_ids.push(course.id);
    }

    let lesson = EnrollmentRepo::create_lesson(pool, course_ids[0], "Intro", 1)
        .await
        .unwrap();
    EnrollmentRepo::record_lesson_completion(pool, user.id, lesson.id, Utc::now())
        .await
        .unwrap();

    user.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelled_before_start_runs_nothing(pool: PgPool) {
    let user_id = seed_active_learner(&pool).await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let sweeps = sweep::run(
        pool.clone(),
        RecommenderConfig::default(),
        Duration::from_secs(3600),
        cancel,
    )
    .await;

    assert_eq!(sweeps, 0);
    let stored = RecommendationRepo::list_for_user(&pool, user_id, None)
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_sweep_runs_immediately(pool: PgPool) {
    let user_id = seed_active_learner(&pool).await;
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(sweep::run(
        pool.clone(),
        RecommenderConfig::default(),
        Duration::from_secs(3600),
        cancel.clone(),
    ));

    let mut stored = Vec::new();
    for _ in 0..100 {
        stored = RecommendationRepo::list_for_user(&pool, user_id, None)
            .await
            .unwrap();
        if !stored.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    cancel.cancel();

    let sweeps = handle.await.unwrap();
    assert_eq!(sweeps, 1);
    assert_eq!(stored.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn shutdown_future_stops_the_loop_after_the_running_sweep(pool: PgPool) {
    let user_id = seed_active_learner(&pool).await;

    // Stands in for the process signal: fires once the first sweep has stored.
    let watcher = pool.clone();
    let shutdown = async move {
        for _ in 0..100 {
            let stored = RecommendationRepo::list_for_user(&watcher, user_id, None)
                .await
                .unwrap();
            if !stored.is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    };

    let sweeps = sweep::run_until(
        pool.clone(),
        RecommenderConfig::default(),
        Duration::from_secs(3600),
        shutdown,
    )
    .await
    .unwrap();

    assert_eq!(sweeps, 1);
    let stored = RecommendationRepo::list_for_user(&pool, user_id, None)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
}
