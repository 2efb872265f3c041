//! Route definitions for per-user recommendations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

/// Routes mounted at `/recommendations`.
///
/// ```text
/// GET    /                      -> list_recommendations
/// POST   /generate              -> generate_recommendations
/// POST   /{course_id}/viewed    -> mark_viewed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recommendations::list_recommendations))
        .route("/generate", post(recommendations::generate_recommendations))
        .route("/{course_id}/viewed", post(recommendations::mark_viewed))
}
