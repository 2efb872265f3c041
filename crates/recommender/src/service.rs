//! Single-user recommendation runs.
//!
//! [`generate_recommendations`] is read-only: it loads the learner profile,
//! the catalog, and the completed set, then ranks. Persistence is the
//! separate [`store_recommendations`] step.

use std::collections::HashSet;

use learnpath_core::error::CoreError;
use learnpath_core::recommendation::{
    rank_courses, CourseCandidate, LearnerProfile, RecommendationOptions, ScoringWeights,
    SkillLevel,
};
use learnpath_core::types::DbId;
use learnpath_db::models::recommendation::{
    NewRecommendation, Recommendation, RecommendationWithCourse,
};
use learnpath_db::repositories::{
    CourseRepo, EnrollmentRepo, RecommendationRepo, SkillRepo, UserRepo,
};
use sqlx::PgPool;

use crate::error::RecommendError;

/// Load everything the scorer needs to know about a learner.
///
/// Fails with [`CoreError::NotFound`] if the user does not exist.
pub async fn load_learner_profile(
    pool: &PgPool,
    user_id: DbId,
) -> Result<LearnerProfile, RecommendError> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    let skills: Vec<SkillLevel> = SkillRepo::list_for_user(pool, user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(LearnerProfile {
        user_id,
        skills,
        interests: user.interest_tag_ids(),
        preferred_style: user.preferences().style,
    })
}

/// Rank the catalog for `user_id` without persisting anything.
pub async fn generate_recommendations(
    pool: &PgPool,
    user_id: DbId,
    options: &RecommendationOptions,
    weights: &ScoringWeights,
) -> Result<Vec<NewRecommendation>, RecommendError> {
    let profile = load_learner_profile(pool, user_id).await?;

    let catalog: Vec<CourseCandidate> = CourseRepo::list_catalog(pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let completed: HashSet<DbId> = if options.include_completed {
        HashSet::new()
    } else {
        EnrollmentRepo::completed_course_ids(pool, user_id)
            .await?
            .into_iter()
            .collect()
    };

    let ranked = rank_courses(&profile, &catalog, &completed, options, weights);

    tracing::debug!(
        user_id,
        catalog_size = catalog.len(),
        completed = completed.len(),
        returned = ranked.len(),
        "Scored course catalog",
    );

    Ok(ranked
        .into_iter()
        .map(|scored| NewRecommendation::from_scored(user_id, scored))
        .collect())
}

/// Persist a recommendation set, replacing the owner's previous set.
///
/// Empty input is a no-op. All entries must belong to the same user.
/// Returns the number of rows written.
pub async fn store_recommendations(
    pool: &PgPool,
    entries: &[NewRecommendation],
) -> Result<u64, RecommendError> {
    let Some(first) = entries.first() else {
        return Ok(0);
    };

    if entries.iter().any(|e| e.user_id != first.user_id) {
        return Err(CoreError::Validation(
            "All recommendations in one store call must belong to the same user".into(),
        )
        .into());
    }

    Ok(RecommendationRepo::replace_for_user(pool, first.user_id, entries).await?)
}

/// Generate and store in one call. Returns what was generated.
pub async fn generate_and_store(
    pool: &PgPool,
    user_id: DbId,
    options: &RecommendationOptions,
    weights: &ScoringWeights,
) -> Result<Vec<NewRecommendation>, RecommendError> {
    let recommendations = generate_recommendations(pool, user_id, options, weights).await?;
    let stored = store_recommendations(pool, &recommendations).await?;

    tracing::info!(user_id, stored, "Recommendations generated");
    Ok(recommendations)
}

/// Stored recommendations for a user, highest score first.
pub async fn get_user_recommendations(
    pool: &PgPool,
    user_id: DbId,
    limit: Option<i64>,
) -> Result<Vec<RecommendationWithCourse>, RecommendError> {
    Ok(RecommendationRepo::list_for_user(pool, user_id, limit).await?)
}

/// Mark the user's recommendation for `course_id` as viewed.
pub async fn mark_viewed(
    pool: &PgPool,
    user_id: DbId,
    course_id: DbId,
) -> Result<Recommendation, RecommendError> {
    RecommendationRepo::mark_viewed(pool, user_id, course_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Recommendation",
                id: course_id,
            }
            .into()
        })
}
