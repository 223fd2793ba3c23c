//! Request extractors that authenticate and authorize callers.
//!
//! - [`auth::AuthUser`] -- the caller behind a valid Bearer token.
//! - [`rbac::RequireAdmin`] -- requires the `Administrator` role.
//! - [`rbac::RequireAuth`] -- any authenticated caller.
//! - [`rbac::ensure_owner_or_admin`] -- write guard for user-owned records.

pub mod auth;
pub mod rbac;
