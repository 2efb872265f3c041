//! User skill model (proficiency 1-10 per tag).

use learnpath_core::recommendation::SkillLevel;
use learnpath_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A `user_skills` row joined with its tag name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSkillWithTag {
    pub tag_id: DbId,
    pub tag_name: String,
    pub proficiency_level: i32,
}

impl From<UserSkillWithTag> for SkillLevel {
    fn from(row: UserSkillWithTag) -> Self {
        SkillLevel {
            tag_id: row.tag_id,
            tag_name: row.tag_name,
            proficiency: row.proficiency_level,
        }
    }
}
