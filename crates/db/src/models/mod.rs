//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod activity;
pub mod analytics;
pub mod certificate;
pub mod course;
pub mod enrollment;
pub mod gallery;
pub mod leadership;
pub mod lesson;
pub mod magazine;
pub mod news;
pub mod payment;
pub mod personnel;
pub mod pg_program;
pub mod profile;
pub mod quiz;
pub mod session;
pub mod setting;
pub mod student_category;
