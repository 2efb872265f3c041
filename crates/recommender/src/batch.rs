//! Recommendation sweep over all recently active learners.
//!
//! Each learner is processed independently: a failure is logged and
//! counted, and the sweep moves on to the next user.

use chrono::{Duration, Utc};
use learnpath_core::recommendation::RecommendationOptions;
use learnpath_core::types::DbId;
use learnpath_db::repositories::UserRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use crate::service::generate_and_store;

/// Outcome counts of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Users selected for the sweep.
    pub active_users: usize,
    /// Users whose new recommendation set was stored.
    pub stored: usize,
    /// Users for whom nothing was eligible (previous set kept).
    pub empty: usize,
    /// Users whose run failed.
    pub failed: usize,
}

/// Regenerate recommendations for every user with a lesson completion in
/// the configured trailing window.
///
/// Only a failure to list the active users aborts the sweep.
pub async fn generate_recommendations_for_all_users(
    pool: &PgPool,
    config: &RecommenderConfig,
) -> Result<BatchSummary, RecommendError> {
    let since = Utc::now() - Duration::days(config.active_window_days);
    let user_ids = UserRepo::list_active_learner_ids(pool, since).await?;

    tracing::info!(
        active_users = user_ids.len(),
        window_days = config.active_window_days,
        "Recommendation sweep started"
    );

    let summary = process_users(pool, &user_ids, config).await;

    tracing::info!(
        active_users = summary.active_users,
        stored = summary.stored,
        empty = summary.empty,
        failed = summary.failed,
        "Recommendation sweep finished"
    );
    Ok(summary)
}

/// Run generate-then-store for each user in order, isolating failures.
pub async fn process_users(
    pool: &PgPool,
    user_ids: &[DbId],
    config: &RecommenderConfig,
) -> BatchSummary {
    let options = RecommendationOptions::default();
    let mut summary = BatchSummary {
        active_users: user_ids.len(),
        ..Default::default()
    };

    for &user_id in user_ids {
        match generate_and_store(pool, user_id, &options, &config.weights).await {
            Ok(recommendations) if recommendations.is_empty() => {
                tracing::debug!(user_id, "No eligible courses, keeping previous set");
                summary.empty += 1;
            }
            Ok(_) => summary.stored += 1,
            Err(e) => {
                tracing::error!(user_id, error = %e, "Recommendation run failed for user");
                summary.failed += 1;
            }
        }
    }

    summary
}
