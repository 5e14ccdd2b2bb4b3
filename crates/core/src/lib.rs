//! Domain logic for the campus portal.
//!
//! Everything here is pure (no database, no HTTP) so it can be unit-tested
//! directly and shared by the `db`, `events` and `api` crates.

pub mod certificate;
pub mod enrollment;
pub mod error;
pub mod grading;
pub mod pagination;
pub mod progress;
pub mod retry;
pub mod roles;
pub mod signature;
pub mod storage;
pub mod types;
pub mod validation;
