//! Repository for the `user_skills` table.

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::skill::UserSkillWithTag;

/// Provides reads and upserts of per-tag proficiency levels.
pub struct SkillRepo;

impl SkillRepo {
    /// All skills recorded for a user, with tag names, ordered by tag id.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserSkillWithTag>, sqlx::Error> {
        sqlx::query_as::<_, UserSkillWithTag>(
            "SELECT s.tag_id, t.name AS tag_name, s.proficiency_level \
             FROM user_skills s \
             JOIN tags t ON t.id = s.tag_id \
             WHERE s.user_id = $1 \
             ORDER BY s.tag_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Set a user's proficiency for a tag, inserting or overwriting.
    ///
    /// The table's CHECK constraint rejects levels outside 1-10.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        tag_id: DbId,
        proficiency_level: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_skills (user_id, tag_id, proficiency_level) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, tag_id) DO UPDATE SET \
                 proficiency_level = EXCLUDED.proficiency_level",
        )
        .bind(user_id)
        .bind(tag_id)
        .bind(proficiency_level)
        .execute(pool)
        .await?;
        Ok(())
    }
}
