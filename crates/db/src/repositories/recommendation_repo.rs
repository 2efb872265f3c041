//! Repository for the `recommendations` table.
//!
//! A user's recommendations are replaced as a whole: each scoring run
//! deletes the previous set and inserts the new one inside a single
//! transaction, serialized per user with a transaction-scoped advisory lock.

use learnpath_core::recommendation::MAX_LIMIT;
use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::recommendation::{NewRecommendation, Recommendation, RecommendationWithCourse};

/// Column list for the `recommendations` table.
const COLUMNS: &str =
    "id, user_id, course_id, score, reason, source, is_viewed, created_at, updated_at";

/// Default number of stored recommendations returned per read.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Maximum number of stored recommendations returned per read. Equal to
/// the largest set a run can store, so a full set is always readable.
pub const MAX_LIST_LIMIT: i64 = MAX_LIMIT as i64;

/// Provides replace-on-write storage and reads of recommendation sets.
pub struct RecommendationRepo;

impl RecommendationRepo {
    /// Replace all of `user_id`'s recommendations with `entries`.
    ///
    /// Empty input is a no-op: the existing set is left untouched. The
    /// `user_id` field of each entry is ignored in favour of the argument;
    /// callers are expected to have checked they agree.
    ///
    /// Returns the number of rows inserted.
    pub async fn replace_for_user(
        pool: &PgPool,
        user_id: DbId,
        entries: &[NewRecommendation],
    ) -> Result<u64, sqlx::Error> {
        if entries.is_empty() {
            return Ok(0);
        }

        let course_ids: Vec<DbId> = entries.iter().map(|e| e.course_id).collect();
        let scores: Vec<f64> = entries.iter().map(|e| e.score).collect();
        let reasons: Vec<&str> = entries.iter().map(|e| e.reason.as_str()).collect();
        let sources: Vec<&str> = entries.iter().map(|e| e.source.as_str()).collect();
        let viewed: Vec<bool> = entries.iter().map(|e| e.is_viewed).collect();

        let mut tx = pool.begin().await?;

        // Overlapping runs for the same user queue here until the first commits.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM recommendations WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let inserted = sqlx::query(
            "INSERT INTO recommendations (user_id, course_id, score, reason, source, is_viewed) \
             SELECT $1, r.course_id, r.score, r.reason, r.source, r.is_viewed \
             FROM UNNEST($2::bigint[], $3::float8[], $4::text[], $5::text[], $6::bool[]) \
                 AS r(course_id, score, reason, source, is_viewed)",
        )
        .bind(user_id)
        .bind(&course_ids)
        .bind(&scores)
        .bind(&reasons)
        .bind(&sources)
        .bind(&viewed)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::debug!(user_id, deleted, inserted, "Replaced stored recommendations");
        Ok(inserted)
    }

    /// Stored recommendations for a user joined with course details,
    /// highest score first.
    ///
    /// `limit` defaults to [`DEFAULT_LIST_LIMIT`] and is clamped to
    /// `1..=MAX_LIST_LIMIT`.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<RecommendationWithCourse>, sqlx::Error> {
        let limit = clamp_limit(limit);
        sqlx::query_as::<_, RecommendationWithCourse>(
            "SELECT r.id, r.user_id, r.course_id, r.score, r.reason, r.source, r.is_viewed, \
                 r.created_at, c.title AS course_title, c.difficulty AS course_difficulty, \
                 c.popularity AS course_popularity \
             FROM recommendations r \
             JOIN courses c ON c.id = r.course_id \
             WHERE r.user_id = $1 \
             ORDER BY r.score DESC, r.id \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Mark one of the user's recommendations as viewed.
    ///
    /// Returns `None` if the user has no recommendation for that course.
    pub async fn mark_viewed(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Recommendation>, sqlx::Error> {
        let query = format!(
            "UPDATE recommendations SET is_viewed = TRUE \
             WHERE user_id = $1 AND course_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}
