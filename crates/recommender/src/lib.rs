//! Course recommendation service.
//!
//! Loads learner and catalog data through `learnpath-db`, ranks courses with
//! the pure scorer in `learnpath-core`, and persists the result. The batch
//! sweep over active learners lives in [`batch`].

pub mod batch;
pub mod config;
pub mod error;
pub mod service;

pub use batch::{generate_recommendations_for_all_users, BatchSummary};
pub use config::RecommenderConfig;
pub use error::RecommendError;
