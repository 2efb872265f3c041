use std::str::FromStr;

use learnpath_core::recommendation::ScoringWeights;

/// Default trailing window (days) in which a lesson completion makes a
/// learner active for the batch sweep.
pub const DEFAULT_ACTIVE_WINDOW_DAYS: i64 = 30;

/// Recommender configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    pub weights: ScoringWeights,
    pub active_window_days: i64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            active_window_days: DEFAULT_ACTIVE_WINDOW_DAYS,
        }
    }
}

impl RecommenderConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                              | Default |
    /// |--------------------------------------|---------|
    /// | `RECOMMENDER_ACTIVE_WINDOW_DAYS`     | `30`    |
    /// | `RECOMMENDER_DIFFICULTY_WEIGHT`      | `2.0`   |
    /// | `RECOMMENDER_TAG_WEIGHT`             | `3.0`   |
    /// | `RECOMMENDER_SKILL_MATCH`            | `0.5`   |
    /// | `RECOMMENDER_DEVELOPING_SKILL_BONUS` | `0.3`   |
    /// | `RECOMMENDER_INTEREST_MATCH`         | `0.8`   |
    /// | `RECOMMENDER_POPULARITY_WEIGHT`      | `0.5`   |
    /// | `RECOMMENDER_LEARNING_STYLE_BONUS`   | `1.5`   |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set but does not parse, if a weight is
    /// negative or not finite, or if the active window is not positive.
    pub fn from_env() -> Self {
        let defaults = ScoringWeights::default();

        let weights = ScoringWeights {
            difficulty_weight: weight_or(
                "RECOMMENDER_DIFFICULTY_WEIGHT",
                defaults.difficulty_weight,
            ),
            tag_weight: weight_or("RECOMMENDER_TAG_WEIGHT", defaults.tag_weight),
            skill_match: weight_or("RECOMMENDER_SKILL_MATCH", defaults.skill_match),
            developing_skill_bonus: weight_or(
                "RECOMMENDER_DEVELOPING_SKILL_BONUS",
                defaults.developing_skill_bonus,
            ),
            interest_match: weight_or("RECOMMENDER_INTEREST_MATCH", defaults.interest_match),
            popularity_weight: weight_or(
                "RECOMMENDER_POPULARITY_WEIGHT",
                defaults.popularity_weight,
            ),
            learning_style_bonus: weight_or(
                "RECOMMENDER_LEARNING_STYLE_BONUS",
                defaults.learning_style_bonus,
            ),
            ..defaults
        };

        let active_window_days: i64 =
            env_or("RECOMMENDER_ACTIVE_WINDOW_DAYS", DEFAULT_ACTIVE_WINDOW_DAYS);
        assert!(
            active_window_days > 0,
            "RECOMMENDER_ACTIVE_WINDOW_DAYS must be positive"
        );

        Self {
            weights,
            active_window_days,
        }
    }
}

/// A weight override from the environment. Must be finite and non-negative.
fn weight_or(key: &str, default: f64) -> f64 {
    checked_weight(key, env_or(key, default))
}

fn checked_weight(key: &str, value: f64) -> f64 {
    assert!(
        value.is_finite() && value >= 0.0,
        "{key} must be a finite, non-negative number (got {value})"
    );
    value
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid number: {e}")),
        Err(_) => default,
    }
}
