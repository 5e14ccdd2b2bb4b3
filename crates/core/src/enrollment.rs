//! Enrollment and payment state constants.
//!
//! These must match the CHECK constraints in the enrollments and payments
//! migrations.

use crate::error::CoreError;

/// The learner can open the course content.
pub const ACCESS_ACTIVE: &str = "active";
/// An admin withdrew access.
pub const ACCESS_REVOKED: &str = "revoked";

pub const VALID_ACCESS_STATES: &[&str] = &[ACCESS_ACTIVE, ACCESS_REVOKED];

/// Enrolled in a free course.
pub const PAYMENT_FREE: &str = "free";
/// Paid through the gateway.
pub const PAYMENT_PAID: &str = "paid";
/// Enrolled manually by an admin without payment.
pub const PAYMENT_WAIVED: &str = "waived";

/// Payment row lifecycle.
pub const PAYMENT_STATUS_PENDING: &str = "pending";
pub const PAYMENT_STATUS_SUCCEEDED: &str = "succeeded";
pub const PAYMENT_STATUS_FAILED: &str = "failed";

/// Gateway event that confirms a charge.
pub const EVENT_CHARGE_SUCCESS: &str = "charge.success";

/// Validate an access state supplied by an admin.
pub fn validate_access_state(state: &str) -> Result<(), CoreError> {
    if VALID_ACCESS_STATES.contains(&state) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid access_state '{state}'. Must be one of: {}",
            VALID_ACCESS_STATES.join(", ")
        )))
    }
}

/// Build a unique payment reference for a learner buying a course.
pub fn payment_reference(course_id: i64, user_id: i64) -> String {
    format!("CP-{course_id}-{user_id}-{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_states() {
        assert!(validate_access_state("active").is_ok());
        assert!(validate_access_state("revoked").is_ok());
        assert!(validate_access_state("paused").is_err());
    }

    #[test]
    fn references_are_unique_and_prefixed() {
        let a = payment_reference(3, 9);
        let b = payment_reference(3, 9);
        assert!(a.starts_with("CP-3-9-"));
        assert_ne!(a, b);
    }
}
