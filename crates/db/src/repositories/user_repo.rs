//! Repository for the `users` table.

use learnpath_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UserProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, email, learning_preferences, interests, created_at, updated_at";

/// Provides profile reads and the active-learner query used by the batch sweep.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, learning_preferences, interests) \
             VALUES ($1, $2, COALESCE($3, '{{}}'::jsonb), COALESCE($4, '[]'::jsonb)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.learning_preferences)
            .bind(&input.interests)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// IDs of users with at least one lesson completed at or after `since`,
    /// in ascending order.
    pub async fn list_active_learner_ids(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT user_id FROM lesson_progress \
             WHERE completed_at IS NOT NULL AND completed_at >= $1 \
             ORDER BY user_id",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
