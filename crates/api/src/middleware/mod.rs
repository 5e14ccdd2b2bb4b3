//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer JWT.
//! - [`rbac::RequireAdmin`] -- `admin` only.
//! - [`rbac::RequireInstructor`] -- `instructor` or `admin`.

pub mod auth;
pub mod rbac;
