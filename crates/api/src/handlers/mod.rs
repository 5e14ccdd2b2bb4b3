//! Request handlers, one submodule per resource.
//!
//! Handlers validate input, delegate to the repositories in `campus_db`,
//! publish portal events and map errors via [`AppError`](crate::error::AppError).

pub mod access;
pub mod analytics;
pub mod auth;
pub mod categories;
pub mod certificates;
pub mod content;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod gallery;
pub mod leadership;
pub mod lessons;
pub mod magazines;
pub mod news;
pub mod payments;
pub mod personnel;
pub mod pg_programs;
pub mod profiles;
pub mod quizzes;
pub mod settings;
pub mod uploads;
