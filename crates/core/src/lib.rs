//! Domain logic for the family tree backend.
//!
//! Everything in this crate is free of I/O so it can be shared by the
//! repository layer, the HTTP layer, and tests.

pub mod error;
pub mod family_tree;
pub mod member;
pub mod pagination;
pub mod relationship;
pub mod roles;
pub mod types;
pub mod upload;
