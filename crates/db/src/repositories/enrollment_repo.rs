//! Repository for the `enrollments`, `lessons`, and `lesson_progress` tables.
//!
//! Only the writes needed to record progress and the reads the recommender
//! consumes live here; the rest of enrollment management belongs elsewhere.

use learnpath_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::enrollment::{Enrollment, Lesson};

/// Column list for the `enrollments` table.
const ENROLLMENT_COLUMNS: &str = "id, user_id, course_id, completed_at, created_at, updated_at";

/// Column list for the `lessons` table.
const LESSON_COLUMNS: &str = "id, course_id, title, sort_order, created_at, updated_at";

pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Enroll a user in a course. Idempotent.
    pub async fn enroll(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, course_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {ENROLLMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Mark an enrollment completed, enrolling first if needed.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
        completed_at: Timestamp,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id, completed_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, course_id) DO UPDATE SET completed_at = EXCLUDED.completed_at \
             RETURNING {ENROLLMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(completed_at)
            .fetch_one(pool)
            .await
    }

    /// IDs of courses the user has completed.
    pub async fn completed_course_ids(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT course_id FROM enrollments \
             WHERE user_id = $1 AND completed_at IS NOT NULL \
             ORDER BY course_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Add a lesson to a course.
    pub async fn create_lesson(
        pool: &PgPool,
        course_id: DbId,
        title: &str,
        sort_order: i32,
    ) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons (course_id, title, sort_order) VALUES ($1, $2, $3) \
             RETURNING {LESSON_COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(course_id)
            .bind(title)
            .bind(sort_order)
            .fetch_one(pool)
            .await
    }

    /// Record that a user finished a lesson at `completed_at`.
    pub async fn record_lesson_completion(
        pool: &PgPool,
        user_id: DbId,
        lesson_id: DbId,
        completed_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO lesson_progress (user_id, lesson_id, completed_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, lesson_id) DO UPDATE SET completed_at = EXCLUDED.completed_at",
        )
        .bind(user_id)
        .bind(lesson_id)
        .bind(completed_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
