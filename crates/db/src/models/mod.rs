//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod dashboard;
pub mod family;
pub mod member;
pub mod photo;
pub mod relationship;
pub mod role;
pub mod session;
pub mod story;
pub mod user;
