use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::error::{ServiceError, ServiceResult};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
});

pub const MIN_PASSWORD_LEN: usize = 8;

/// Trims `value` and rejects it when nothing is left.
pub fn non_empty(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} should not be empty")));
    }
    Ok(trimmed.to_string())
}

pub fn optional_non_empty(field: &str, value: Option<&str>) -> ServiceResult<Option<String>> {
    value.map(|v| non_empty(field, v)).transpose()
}

pub fn email(value: &str) -> ServiceResult<String> {
    let normalized = value.trim().to_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(ServiceError::validation("email must be an email"));
    }
    Ok(normalized)
}

pub fn password(value: &str) -> ServiceResult<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::validation(format!(
            "password must be longer than or equal to {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn salary(value: Option<f64>) -> ServiceResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(ServiceError::validation("salary must be a number")),
        Some(v) if v < 0.0 => Err(ServiceError::validation("salary must not be less than 0")),
        other => Ok(other),
    }
}
