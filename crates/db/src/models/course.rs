//! Course catalog models.

use learnpath_core::learning::parse_styles;
use learnpath_core::recommendation::{CourseCandidate, CourseTag};
use learnpath_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub difficulty: Option<i32>,
    pub popularity: i64,
    pub learning_styles: Option<Vec<String>>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A published course with its tags aggregated in one query.
///
/// `tag_ids` and `tag_names` are parallel arrays ordered by tag id.
#[derive(Debug, Clone, FromRow)]
pub struct CatalogCourse {
    pub id: DbId,
    pub difficulty: Option<i32>,
    pub popularity: i64,
    pub learning_styles: Option<Vec<String>>,
    pub tag_ids: Vec<DbId>,
    pub tag_names: Vec<String>,
}

impl From<CatalogCourse> for CourseCandidate {
    fn from(row: CatalogCourse) -> Self {
        let tags = row
            .tag_ids
            .into_iter()
            .zip(row.tag_names)
            .map(|(id, name)| CourseTag { id, name })
            .collect();

        CourseCandidate {
            id: row.id,
            difficulty: row.difficulty,
            popularity: row.popularity,
            learning_styles: parse_styles(row.learning_styles.as_deref().unwrap_or_default()),
            tags,
        }
    }
}

/// DTO for creating a course together with its tag associations.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub difficulty: Option<i32>,
    pub popularity: Option<i64>,
    pub learning_styles: Option<Vec<String>>,
    pub is_published: Option<bool>,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}
