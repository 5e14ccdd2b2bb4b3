//! Input validators shared by the account, course and content handlers.
//!
//! Every validator runs before any database call and returns
//! [`CoreError::Validation`] with a message suitable for display.

use crate::error::CoreError;
use crate::types::MinorUnits;

/// Minimum password length enforced at sign-up and password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length for short text fields (titles, names).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Reject blank values for a required field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Required, trimmed, at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(field: &str, value: &str) -> Result<(), CoreError> {
    require_non_empty(field, value)?;
    if value.trim().chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Loose structural email check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("'{email}' is not a valid email address")))
    }
}

/// Enforce the minimum password length.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Sign-up form: all fields present, valid email, strong and matching passwords.
pub fn validate_signup(
    email: &str,
    full_name: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), CoreError> {
    require_non_empty("Full name", full_name)?;
    require_non_empty("Email", email)?;
    require_non_empty("Password", password)?;
    validate_email(email)?;
    validate_password_strength(password)?;
    if password != confirm_password {
        return Err(CoreError::Validation("Passwords do not match".into()));
    }
    Ok(())
}

/// Display order must be non-negative.
pub fn validate_display_order(order: i32) -> Result<(), CoreError> {
    if order < 0 {
        return Err(CoreError::Validation(format!(
            "display_order must be >= 0, got {order}"
        )));
    }
    Ok(())
}

/// A paid course needs a positive price; a free course must not carry one.
pub fn validate_pricing(is_paid: bool, price: Option<MinorUnits>) -> Result<(), CoreError> {
    match (is_paid, price) {
        (true, Some(p)) if p > 0 => Ok(()),
        (true, _) => Err(CoreError::Validation(
            "A paid course requires a price greater than zero".into(),
        )),
        (false, Some(p)) if p != 0 => Err(CoreError::Validation(
            "A free course must not have a price".into(),
        )),
        (false, _) => Ok(()),
    }
}
