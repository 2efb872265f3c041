//! Tag model. Tags label skills, topics, and interests.

use learnpath_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    /// Normalized (trimmed, lowercase) name. Unique.
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tag via `create_or_get`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
}
