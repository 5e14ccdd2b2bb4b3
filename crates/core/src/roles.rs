//! Well-known role name constants.
//!
//! These must match the `chk_profiles_role` constraint in
//! `20260301000001_create_profiles.sql`.

use crate::error::CoreError;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_INSTRUCTOR, ROLE_ADMIN];

/// Validate that `role` is one of [`VALID_ROLES`].
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

/// Whether the role may author courses, lessons and quizzes.
pub fn can_author(role: &str) -> bool {
    role == ROLE_INSTRUCTOR || role == ROLE_ADMIN
}
