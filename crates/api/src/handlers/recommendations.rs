//! Handlers for the current user's course recommendations.
//!
//! All endpoints act on the user identified by [`AuthUser`]; there is no
//! way to read or regenerate another user's set through the API.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use learnpath_core::recommendation::RecommendationRequest;
use learnpath_core::types::DbId;
use learnpath_recommender::service;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/recommendations
///
/// Stored recommendations, highest score first.
pub async fn list_recommendations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let items = service::get_user_recommendations(&state.pool, auth.user_id, params.limit).await?;

    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/recommendations/generate
///
/// Re-rank the catalog for the current user, replace their stored set, and
/// return it. The body is optional; omitted fields take their defaults.
pub async fn generate_recommendations(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let request: RecommendationRequest = if body.is_empty() {
        RecommendationRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };
    let options = request.resolve();

    let generated = service::generate_and_store(
        &state.pool,
        auth.user_id,
        &options,
        &state.config.recommender.weights,
    )
    .await?;

    // An empty run leaves the previous set in place, so read back what is
    // actually stored rather than echoing the generated list.
    let limit = i64::try_from(options.limit).ok();
    let items = service::get_user_recommendations(&state.pool, auth.user_id, limit).await?;

    tracing::info!(
        user_id = auth.user_id,
        generated = generated.len(),
        returned = items.len(),
        "Recommendations regenerated via API",
    );

    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/recommendations/{course_id}/viewed
pub async fn mark_viewed(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recommendation = service::mark_viewed(&state.pool, auth.user_id, course_id).await?;

    tracing::debug!(user_id = auth.user_id, course_id, "Recommendation viewed");

    Ok(Json(DataResponse {
        data: recommendation,
    }))
}
