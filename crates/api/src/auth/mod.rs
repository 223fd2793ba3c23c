//! Token and password primitives.
//!
//! - [`password`] -- Argon2id hashing and the minimum-length rule.
//! - [`jwt`] -- access-token signing/validation and refresh-token hashing.

pub mod jwt;
pub mod password;
