use std::time::Duration;

use learnpath_recommender::RecommenderConfig;

/// Default time between sweeps: one day.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 86_400;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Time between sweeps in loop mode.
    pub sweep_interval: Duration,
    /// Run one sweep and exit.
    pub run_once: bool,
    pub recommender: RecommenderConfig,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                              | Default  |
    /// |--------------------------------------|----------|
    /// | `RECOMMENDATION_SWEEP_INTERVAL_SECS` | `86400`  |
    /// | `RECOMMENDATION_SWEEP_ONCE`          | `false`  |
    ///
    /// Recommender settings come from [`RecommenderConfig::from_env`].
    pub fn from_env() -> Self {
        let interval_secs: u64 = std::env::var("RECOMMENDATION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse()
            .expect("RECOMMENDATION_SWEEP_INTERVAL_SECS must be a valid u64");
        assert!(
            interval_secs > 0,
            "RECOMMENDATION_SWEEP_INTERVAL_SECS must be positive"
        );

        let run_once = std::env::var("RECOMMENDATION_SWEEP_ONCE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            sweep_interval: Duration::from_secs(interval_secs),
            run_once,
            recommender: RecommenderConfig::from_env(),
        }
    }
}
