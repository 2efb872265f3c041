//! Repository for the `courses` and `course_tags` tables.

use learnpath_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{CatalogCourse, Course, CreateCourse};

/// Column list for the `courses` table.
const COLUMNS: &str = "id, title, difficulty, popularity, learning_styles, is_published, \
    created_at, updated_at";

/// Provides course creation and the catalog prefetch used for scoring.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course.
    ///
    /// If `tag_ids` is non-empty, also creates junction rows in the same
    /// transaction.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO courses (title, difficulty, popularity, learning_styles, is_published) \
             VALUES ($1, $2, COALESCE($3, 0), $4, COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&insert_query)
            .bind(&input.title)
            .bind(input.difficulty)
            .bind(input.popularity)
            .bind(&input.learning_styles)
            .bind(input.is_published)
            .fetch_one(&mut *tx)
            .await?;

        if !input.tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO course_tags (course_id, tag_id) \
                 SELECT $1, tag_id FROM UNNEST($2::bigint[]) AS t(tag_id) \
                 ON CONFLICT (course_id, tag_id) DO NOTHING",
            )
            .bind(course.id)
            .bind(&input.tag_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(course)
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every published course with its tags, ordered by course id.
    ///
    /// One join-and-group query, so scoring never issues per-course lookups.
    pub async fn list_catalog(pool: &PgPool) -> Result<Vec<CatalogCourse>, sqlx::Error> {
        sqlx::query_as::<_, CatalogCourse>(
            "SELECT c.id, c.difficulty, c.popularity, c.learning_styles, \
                 COALESCE(array_agg(t.id ORDER BY t.id) FILTER (WHERE t.id IS NOT NULL), \
                          '{}'::bigint[]) AS tag_ids, \
                 COALESCE(array_agg(t.name ORDER BY t.id) FILTER (WHERE t.id IS NOT NULL), \
                          '{}'::text[]) AS tag_names \
             FROM courses c \
             LEFT JOIN course_tags ct ON ct.course_id = c.id \
             LEFT JOIN tags t ON t.id = ct.tag_id \
             WHERE c.is_published \
             GROUP BY c.id \
             ORDER BY c.id",
        )
        .fetch_all(pool)
        .await
    }
}
