//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Lookups return `Option`,
//! deletes return whether a row was removed.

pub mod dashboard_repo;
pub mod family_repo;
pub mod member_repo;
pub mod photo_repo;
pub mod relationship_repo;
pub mod role_repo;
pub mod session_repo;
pub mod story_repo;
pub mod user_repo;

pub use dashboard_repo::DashboardRepo;
pub use family_repo::{FamilyFilter, FamilyRepo};
pub use member_repo::MemberRepo;
pub use photo_repo::PhotoRepo;
pub use relationship_repo::RelationshipRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use story_repo::StoryRepo;
pub use user_repo::UserRepo;
