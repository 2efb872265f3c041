//! Learner profile vocabulary: learning styles, pace, and interest sets.
//!
//! User profiles store `learning_preferences` and `interests` as loosely
//! typed JSON. The parsers here turn those blobs into typed values once, at
//! the data-access boundary, so the scorer only ever sees validated input.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Learning style
// ---------------------------------------------------------------------------

/// How a learner prefers to consume material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
}

impl LearningStyle {
    /// Lowercase name as stored in the database and shown in reasons.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Auditory => "auditory",
            Self::Reading => "reading",
            Self::Kinesthetic => "kinesthetic",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visual" => Ok(Self::Visual),
            "auditory" => Ok(Self::Auditory),
            "reading" | "reading/writing" | "read_write" => Ok(Self::Reading),
            "kinesthetic" => Ok(Self::Kinesthetic),
            other => Err(format!("unknown learning style '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Pace
// ---------------------------------------------------------------------------

/// Preferred study pace. Carried on the profile; not used in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Slow,
    Moderate,
    Fast,
}

impl FromStr for Pace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::Slow),
            "moderate" => Ok(Self::Moderate),
            "fast" => Ok(Self::Fast),
            other => Err(format!("unknown pace '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Typed view of the `users.learning_preferences` JSON column.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct LearningPreferences {
    pub style: Option<LearningStyle>,
    pub pace: Option<Pace>,
}

impl LearningPreferences {
    /// Parse the stored JSON blob.
    ///
    /// Anything that is not an object yields empty preferences. Unknown
    /// `style` / `pace` strings are dropped rather than rejected.
    pub fn from_json(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };

        let style = map
            .get("style")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok());
        let pace = map
            .get("pace")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok());

        Self { style, pace }
    }
}

/// Parse the `users.interests` JSON column into a set of tag ids.
///
/// Accepts integers and numeric strings; every other element is skipped.
pub fn parse_interests(value: Option<&Value>) -> HashSet<DbId> {
    let Some(Value::Array(items)) = value else {
        return HashSet::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect()
}

/// Parse a course's `learning_styles` column, skipping unknown entries.
pub fn parse_styles<S: AsRef<str>>(raw: &[S]) -> Vec<LearningStyle> {
    raw.iter().filter_map(|s| s.as_ref().parse().ok()).collect()
}
