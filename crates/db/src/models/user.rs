//! User profile model.
//!
//! `learning_preferences` and `interests` are stored as JSONB and parsed
//! into typed values here, so callers never touch the raw blobs.

use std::collections::HashSet;

use learnpath_core::learning::{parse_interests, LearningPreferences};
use learnpath_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub learning_preferences: serde_json::Value,
    pub interests: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserProfile {
    /// Typed learning preferences. Malformed blobs yield empty preferences.
    pub fn preferences(&self) -> LearningPreferences {
        let prefs = LearningPreferences::from_json(Some(&self.learning_preferences));
        if prefs.style.is_none() && self.learning_preferences.get("style").is_some() {
            tracing::warn!(
                user_id = self.id,
                "Ignoring unrecognised learning style in user preferences",
            );
        }
        prefs
    }

    /// Interest tag ids. Non-numeric entries are dropped.
    pub fn interest_tag_ids(&self) -> HashSet<DbId> {
        parse_interests(Some(&self.interests))
    }
}

/// DTO for creating a user profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub learning_preferences: Option<serde_json::Value>,
    pub interests: Option<serde_json::Value>,
}
