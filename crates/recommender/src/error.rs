use learnpath_core::error::CoreError;

/// Failure of a single recommendation run.
///
/// Either the domain rejected the request (unknown user, bad input) or a
/// data-access call failed. Neither is retried.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
