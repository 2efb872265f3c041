//! Periodic regeneration of recommendations for active learners.

use std::future::Future;
use std::time::Duration;

use learnpath_recommender::{generate_recommendations_for_all_users, RecommenderConfig};
use sqlx::PgPool;
use tokio::task::JoinError;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop until `cancel` fires. The first sweep starts
/// immediately.
///
/// A failed sweep is logged and retried at the next tick. Cancellation is
/// only observed between sweeps, so an in-flight sweep always finishes.
/// Returns the number of sweeps attempted.
pub async fn run(
    pool: PgPool,
    config: RecommenderConfig,
    every: Duration,
    cancel: CancellationToken,
) -> usize {
    tracing::info!(
        interval_secs = every.as_secs(),
        window_days = config.active_window_days,
        "Recommendation sweep job started"
    );

    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut sweeps = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(sweeps, "Recommendation sweep job stopping");
                break;
            }
            _ = interval.tick() => {
                sweeps += 1;
                if let Err(e) = generate_recommendations_for_all_users(&pool, &config).await {
                    tracing::error!(error = %e, "Recommendation sweep failed");
                }
            }
        }
    }

    sweeps
}

/// Run the loop in its own task until `shutdown` resolves, then let the
/// in-flight sweep finish. Returns the number of sweeps attempted.
pub async fn run_until<F>(
    pool: PgPool,
    config: RecommenderConfig,
    every: Duration,
    shutdown: F,
) -> Result<usize, JoinError>
where
    F: Future<Output = ()>,
{
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(run(pool, config, every, cancel.clone()));

    shutdown.await;
    cancel.cancel();

    handle.await
}
