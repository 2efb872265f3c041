//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod course_repo;
pub mod enrollment_repo;
pub mod recommendation_repo;
pub mod skill_repo;
pub mod tag_repo;
pub mod user_repo;

pub use course_repo::CourseRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use recommendation_repo::RecommendationRepo;
pub use skill_repo::SkillRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
