//! Stored recommendation models.

use learnpath_core::recommendation::{ScoredCourse, SOURCE_ALGORITHM};
use learnpath_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recommendations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recommendation {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub score: f64,
    pub reason: String,
    pub source: String,
    pub is_viewed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A stored recommendation joined with the course it points at.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecommendationWithCourse {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub score: f64,
    pub reason: String,
    pub source: String,
    pub is_viewed: bool,
    pub created_at: Timestamp,
    pub course_title: String,
    pub course_difficulty: Option<i32>,
    pub course_popularity: i64,
}

/// A recommendation ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecommendation {
    pub user_id: DbId,
    pub course_id: DbId,
    pub score: f64,
    pub reason: String,
    pub source: String,
    pub is_viewed: bool,
}

impl NewRecommendation {
    /// Wrap a scorer result for `user_id`, tagged as algorithm output.
    pub fn from_scored(user_id: DbId, scored: ScoredCourse) -> Self {
        Self {
            user_id,
            course_id: scored.course_id,
            score: scored.score,
            reason: scored.reason,
            source: SOURCE_ALGORITHM.to_string(),
            is_viewed: false,
        }
    }
}
