//! Course recommendation scoring: constants, types, and pure ranking logic.
//!
//! Each candidate course is scored independently as a weighted sum of
//! difficulty fit, tag/interest overlap, popularity, and learning-style
//! match. Every contribution is recorded as a [`ScoreComponent`]; the single
//! display reason is a projection over that list (see [`display_reason`]).

use std::collections::HashSet;

use crate::learning::LearningStyle;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Source tag stored on every recommendation produced by the scorer.
pub const SOURCE_ALGORITHM: &str = "algorithm";

/// Default number of recommendations returned.
pub const DEFAULT_LIMIT: usize = 5;

/// Largest set a single run may produce. Matches the stored-read ceiling.
pub const MAX_LIMIT: usize = 100;

/// Default maximum gap between course difficulty and average skill.
pub const DEFAULT_DIFFICULTY_MAX_DELTA: f64 = 2.0;

/// Difficulty assumed for courses without one (mid-scale).
pub const DEFAULT_COURSE_DIFFICULTY: i32 = 5;

/// Average skill assumed for users with no recorded skills.
pub const DEFAULT_AVERAGE_SKILL: f64 = 5.0;

/// Reason used when no component produced one.
pub const DEFAULT_REASON: &str = "Based on your learning history";

pub const DIFFICULTY_REASON: &str = "Difficulty level matches your skill level";

pub const POPULAR_REASON: &str = "Popular among learners";

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Tunable constants of the scoring formula.
///
/// [`Default`] reproduces the production formula exactly. Deployments may
/// override individual values through configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoringWeights {
    /// Multiplier applied to the difficulty fit sub-score.
    pub difficulty_weight: f64,
    /// Multiplier applied to the raw tag/interest score.
    pub tag_weight: f64,
    /// Raw tag score added when the user has a skill in the tag.
    pub skill_match: f64,
    /// Extra raw tag score for skills still below `developing_skill_ceiling`.
    pub developing_skill_bonus: f64,
    /// Proficiency strictly below which a skill counts as still developing.
    pub developing_skill_ceiling: i32,
    /// Raw tag score added when the tag is one of the user's interests.
    pub interest_match: f64,
    /// Popularity at which the popularity term saturates.
    pub popularity_cap: f64,
    /// Maximum contribution of the popularity term.
    pub popularity_weight: f64,
    /// Popularity strictly above which a course is called popular.
    pub popular_threshold: i64,
    /// Flat bonus for a course matching the user's learning style.
    pub learning_style_bonus: f64,
    /// Difficulty sub-score strictly above which the difficulty reason fires.
    pub difficulty_reason_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            difficulty_weight: 2.0,
            tag_weight: 3.0,
            skill_match: 0.5,
            developing_skill_bonus: 0.3,
            developing_skill_ceiling: 7,
            interest_match: 0.8,
            popularity_cap: 100.0,
            popularity_weight: 0.5,
            popular_threshold: 50,
            learning_style_bonus: 1.5,
            difficulty_reason_threshold: 0.7,
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Caller-supplied options, all optional. Resolve with [`RecommendationRequest::resolve`].
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RecommendationRequest {
    pub limit: Option<i64>,
    pub include_completed: Option<bool>,
    pub difficulty_max_delta: Option<f64>,
    pub consider_learning_style: Option<bool>,
}

impl RecommendationRequest {
    /// Apply defaults. Non-positive limits and non-positive or non-finite
    /// deltas fall back to their defaults instead of failing. Limits above
    /// [`MAX_LIMIT`] are capped.
    pub fn resolve(&self) -> RecommendationOptions {
        let defaults = RecommendationOptions::default();

        let limit = match self.limit {
            Some(n) if n > 0 => usize::try_from(n).map_or(MAX_LIMIT, |n| n.min(MAX_LIMIT)),
            _ => defaults.limit,
        };
        let difficulty_max_delta = match self.difficulty_max_delta {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => defaults.difficulty_max_delta,
        };

        RecommendationOptions {
            limit,
            include_completed: self.include_completed.unwrap_or(defaults.include_completed),
            difficulty_max_delta,
            consider_learning_style: self
                .consider_learning_style
                .unwrap_or(defaults.consider_learning_style),
        }
    }
}

/// Fully resolved scoring options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationOptions {
    pub limit: usize,
    pub include_completed: bool,
    pub difficulty_max_delta: f64,
    pub consider_learning_style: bool,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            include_completed: false,
            difficulty_max_delta: DEFAULT_DIFFICULTY_MAX_DELTA,
            consider_learning_style: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A recorded skill with its tag name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillLevel {
    pub tag_id: DbId,
    pub tag_name: String,
    /// Proficiency on a 1-10 scale.
    pub proficiency: i32,
}

/// Everything the scorer needs to know about the learner.
#[derive(Debug, Clone, Default)]
pub struct LearnerProfile {
    pub user_id: DbId,
    pub skills: Vec<SkillLevel>,
    pub interests: HashSet<DbId>,
    pub preferred_style: Option<LearningStyle>,
}

impl LearnerProfile {
    /// Mean proficiency across all skills, or [`DEFAULT_AVERAGE_SKILL`] if none.
    pub fn average_proficiency(&self) -> f64 {
        if self.skills.is_empty() {
            return DEFAULT_AVERAGE_SKILL;
        }
        let total: i64 = self.skills.iter().map(|s| i64::from(s.proficiency)).sum();
        total as f64 / self.skills.len() as f64
    }

    fn skill_for(&self, tag_id: DbId) -> Option<&SkillLevel> {
        self.skills.iter().find(|s| s.tag_id == tag_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseTag {
    pub id: DbId,
    pub name: String,
}

/// A catalog course with its tags prefetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCandidate {
    pub id: DbId,
    pub difficulty: Option<i32>,
    pub popularity: i64,
    pub learning_styles: Vec<LearningStyle>,
    pub tags: Vec<CourseTag>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Which rule produced a score component. Declaration order is reason priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Difficulty,
    SkillMatch,
    InterestMatch,
    Popularity,
    LearningStyle,
}

/// One term of a course's score.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoreComponent {
    pub kind: ComponentKind,
    pub weight: f64,
    pub raw: f64,
    /// Display reason, present only when the rule's reason condition fired.
    pub reason: Option<String>,
}

impl ScoreComponent {
    pub fn contribution(&self) -> f64 {
        self.raw * self.weight
    }
}

/// A scored course, before persistence.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoredCourse {
    pub course_id: DbId,
    pub score: f64,
    pub reason: String,
    pub components: Vec<ScoreComponent>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Linear difficulty falloff: 1.0 at an exact match, 0.0 once the gap
/// reaches `max_delta`.
pub fn difficulty_fit(course_difficulty: f64, average_skill: f64, max_delta: f64) -> f64 {
    let delta = (course_difficulty - average_skill).abs();
    if delta > max_delta || max_delta <= 0.0 {
        return 0.0;
    }
    1.0 - delta / max_delta
}

/// Popularity term before weighting, saturating at `cap`.
pub fn popularity_ratio(popularity: i64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return 0.0;
    }
    (popularity.max(0) as f64 / cap).min(1.0)
}

/// First fired reason in component order, or [`DEFAULT_REASON`].
pub fn display_reason(components: &[ScoreComponent]) -> String {
    components
        .iter()
        .find_map(|c| c.reason.clone())
        .unwrap_or_else(|| DEFAULT_REASON.to_string())
}

/// Break one course's score into components, in reason-priority order.
pub fn score_components(
    course: &CourseCandidate,
    profile: &LearnerProfile,
    average_skill: f64,
    options: &RecommendationOptions,
    weights: &ScoringWeights,
) -> Vec<ScoreComponent> {
    let mut components = Vec::with_capacity(course.tags.len() * 2 + 3);

    let difficulty = f64::from(course.difficulty.unwrap_or(DEFAULT_COURSE_DIFFICULTY));
    let fit = difficulty_fit(difficulty, average_skill, options.difficulty_max_delta);
    components.push(ScoreComponent {
        kind: ComponentKind::Difficulty,
        weight: weights.difficulty_weight,
        raw: fit,
        reason: (fit > weights.difficulty_reason_threshold).then(|| DIFFICULTY_REASON.to_string()),
    });

    for tag in &course.tags {
        if let Some(skill) = profile.skill_for(tag.id) {
            let mut raw = weights.skill_match;
            if skill.proficiency < weights.developing_skill_ceiling {
                raw += weights.developing_skill_bonus;
            }
            components.push(ScoreComponent {
                kind: ComponentKind::SkillMatch,
                weight: weights.tag_weight,
                raw,
                reason: Some(format!("Builds on your {} skills", tag.name)),
            });
        }
        if profile.interests.contains(&tag.id) {
            components.push(ScoreComponent {
                kind: ComponentKind::InterestMatch,
                weight: weights.tag_weight,
                raw: weights.interest_match,
                reason: Some(format!("Matches your interest in {}", tag.name)),
            });
        }
    }

    components.push(ScoreComponent {
        kind: ComponentKind::Popularity,
        weight: weights.popularity_weight,
        raw: popularity_ratio(course.popularity, weights.popularity_cap),
        reason: (course.popularity > weights.popular_threshold)
            .then(|| POPULAR_REASON.to_string()),
    });

    if options.consider_learning_style {
        if let Some(style) = profile.preferred_style {
            let matches = course.learning_styles.contains(&style);
            components.push(ScoreComponent {
                kind: ComponentKind::LearningStyle,
                weight: weights.learning_style_bonus,
                raw: if matches { 1.0 } else { 0.0 },
                reason: matches.then(|| format!("Matches your {style} learning style")),
            });
        }
    }

    components
}

/// Score a single course.
pub fn score_course(
    course: &CourseCandidate,
    profile: &LearnerProfile,
    average_skill: f64,
    options: &RecommendationOptions,
    weights: &ScoringWeights,
) -> ScoredCourse {
    let components = score_components(course, profile, average_skill, options, weights);
    let score = components.iter().map(ScoreComponent::contribution).sum();
    let reason = display_reason(&components);

    ScoredCourse {
        course_id: course.id,
        score,
        reason,
        components,
    }
}

/// Score and rank the catalog for one learner.
///
/// Completed courses are dropped unless `options.include_completed`. The
/// sort is stable, so equal scores keep catalog order. The result holds at
/// most `options.limit` entries.
pub fn rank_courses(
    profile: &LearnerProfile,
    catalog: &[CourseCandidate],
    completed: &HashSet<DbId>,
    options: &RecommendationOptions,
    weights: &ScoringWeights,
) -> Vec<ScoredCourse> {
    let average_skill = profile.average_proficiency();

    let mut scored: Vec<ScoredCourse> = catalog
        .iter()
        .filter(|course| options.include_completed || !completed.contains(&course.id))
        .map(|course| score_course(course, profile, average_skill, options, weights))
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(options.limit);
    scored
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
