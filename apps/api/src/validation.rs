//! Input checks run before any store call. Failures surface as `AppError::Validation`.

use crate::errors::AppError;

/// Checks that a percentage lies within [0, 100].
pub fn validate_percentage(field: &str, value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::Validation(format!(
            "{field} must be a valid percentage between 0 and 100"
        )));
    }
    Ok(value)
}

/// Trims a required text field, rejecting it when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounds_inclusive() {
        assert_eq!(validate_percentage("Attendance", 0.0).unwrap(), 0.0);
        assert_eq!(validate_percentage("Attendance", 100.0).unwrap(), 100.0);
        assert_eq!(validate_percentage("Attendance", 85.5).unwrap(), 85.5);
    }

    #[test]
    fn test_percentage_out_of_range() {
        assert!(validate_percentage("Attendance", -0.1).is_err());
        assert!(validate_percentage("Attendance", 100.1).is_err());
        assert!(validate_percentage("Attendance", f64::NAN).is_err());
    }

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("Course name", "  Algorithms ").unwrap(), "Algorithms");
    }

    #[test]
    fn test_require_text_rejects_blank() {
        let err = require_text("Reason", "   ").unwrap_err();
        assert_eq!(err.user_message(), "Reason is required");
    }
}
