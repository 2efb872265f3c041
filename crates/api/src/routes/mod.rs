pub mod health;
pub mod recommendations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /recommendations                         list (GET)
/// /recommendations/generate                regenerate for current user (POST)
/// /recommendations/{course_id}/viewed      mark viewed (POST)
/// ```
///
/// All routes require a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/recommendations", recommendations::router())
}
