use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnpath_recommender::generate_recommendations_for_all_users;
use learnpath_worker::config::WorkerConfig;
use learnpath_worker::shutdown::shutdown_signal;
use learnpath_worker::sweep;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "learnpath_worker=debug,learnpath_recommender=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = learnpath_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    learnpath_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    if config.run_once {
        return match generate_recommendations_for_all_users(&pool, &config.recommender).await {
            Ok(summary) => {
                tracing::info!(?summary, "Single sweep complete");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "Single sweep failed");
                ExitCode::FAILURE
            }
        };
    }

    let outcome = sweep::run_until(
        pool,
        config.recommender,
        config.sweep_interval,
        shutdown_signal(),
    )
    .await;

    match outcome {
        Ok(sweeps) => {
            tracing::info!(sweeps, "Worker stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Sweep task panicked");
            ExitCode::FAILURE
        }
    }
}
