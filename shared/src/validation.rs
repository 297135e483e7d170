//! Input validation functions
//!
//! This module provides validation utilities for user and goal input.
//! Validators return the first violated constraint as a [`ValidationError`]
//! carrying a user-friendly field label.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;

/// Maximum accepted email length
pub const MAX_EMAIL_LEN: usize = 255;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map wire field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "email" => "Email",
        "password" => "Password",
        "type" => "Goal type",
        "target" => "Target",
        "timeframe" => "Timeframe",
        "currentValue" => "Current value",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{display_label}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

// ============================================================================
// Account Validation
// ============================================================================

/// Require a present, non-blank text value
pub fn validate_required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::new(field, "is required and cannot be empty")),
    }
}

/// Validate email format
///
/// Emails are compared case-sensitively and are not normalised.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email", "is required and cannot be empty"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::new("email", "is too long"));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("email", "has an invalid format"));
    }
    Ok(())
}

/// Validate a registration payload, returning the checked fields
pub fn validate_registration<'a>(
    name: Option<&'a str>,
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str, &'a str), ValidationError> {
    let name = validate_required("name", name)?;
    let email = validate_required("email", email)?;
    let password = validate_password(password)?;
    validate_email(email)?;
    Ok((name, email, password))
}

/// Validate a login payload, returning the checked fields
pub fn validate_login<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), ValidationError> {
    let email = validate_required("email", email)?;
    let password = validate_password(password)?;
    validate_email(email)?;
    Ok((email, password))
}

/// Passwords only need to be present; whitespace is significant.
fn validate_password(password: Option<&str>) -> Result<&str, ValidationError> {
    match password {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(ValidationError::new("password", "is required and cannot be empty")),
    }
}

// ============================================================================
// Goal Validation
// ============================================================================

/// Validate a goal target: finite and strictly positive
pub fn validate_target(target: f64) -> Result<(), ValidationError> {
    if !target.is_finite() {
        return Err(ValidationError::new("target", "must be a valid number"));
    }
    if target <= 0.0 {
        return Err(ValidationError::new("target", "must be a positive number"));
    }
    Ok(())
}

/// Validate a goal's current value against its target
pub fn validate_current_value(current_value: f64, target: f64) -> Result<(), ValidationError> {
    if !current_value.is_finite() {
        return Err(ValidationError::new("currentValue", "must be a valid number"));
    }
    if current_value < 0.0 {
        return Err(ValidationError::new("currentValue", "cannot be negative"));
    }
    if current_value > target {
        return Err(ValidationError::new("currentValue", "cannot exceed the target value"));
    }
    Ok(())
}

/// Validate a complete set of goal fields
///
/// Enforces `type`/`timeframe` non-blank, `target > 0` and
/// `0 <= currentValue <= target`.
pub fn validate_goal(
    goal_type: &str,
    target: f64,
    timeframe: &str,
    current_value: f64,
) -> Result<(), ValidationError> {
    validate_required("type", Some(goal_type))?;
    validate_target(target)?;
    validate_required("timeframe", Some(timeframe))?;
    validate_current_value(current_value, target)?;
    Ok(())
}
