//! Field validation rules for task payloads
//!
//! Each rule returns the message for the first failing constraint; callers
//! short-circuit before touching the store.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{Error, Result};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_CATEGORY_LEN: usize = 50;

/// Validate a task name supplied on create (required, non-empty, bounded)
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("Name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::Validation(
            "Name must be less than 100 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate a task name supplied on update (optional, but non-empty if present)
pub fn validate_rename(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(
            "Name cannot be empty if provided".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::Validation(
            "Name must be less than 100 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(Error::Validation(
            "Description must be less than 500 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<()> {
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(Error::Validation(
            "Category must be less than 50 characters".to_string(),
        ));
    }
    Ok(())
}

/// Parse a deadline value.
///
/// Accepts an RFC 3339 timestamp or a bare calendar date (`YYYY-MM-DD`,
/// interpreted as midnight UTC) — the two forms the form-driven UIs submit.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(Error::Validation(
        "Deadline must be a valid date".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        assert!(validate_name("Ship release").is_ok());
        let err = validate_name("   ").unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_name_length_bound() {
        let long = "x".repeat(101);
        let err = validate_name(&long).unwrap_err();
        assert_eq!(err.to_string(), "Name must be less than 100 characters");
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_rename_rejects_empty() {
        let err = validate_rename("").unwrap_err();
        assert_eq!(err.to_string(), "Name cannot be empty if provided");
    }

    #[test]
    fn test_description_length_bound() {
        assert!(validate_description(&"d".repeat(500)).is_ok());
        let err = validate_description(&"d".repeat(501)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Description must be less than 500 characters"
        );
    }

    #[test]
    fn test_category_length_bound() {
        assert!(validate_category(&"c".repeat(50)).is_ok());
        let err = validate_category(&"c".repeat(51)).unwrap_err();
        assert_eq!(err.to_string(), "Category must be less than 50 characters");
    }

    #[test]
    fn test_deadline_rfc3339() {
        let parsed = parse_deadline("2026-03-01T12:30:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_deadline_calendar_date() {
        let parsed = parse_deadline("2026-03-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_deadline_invalid() {
        let err = parse_deadline("next tuesday").unwrap_err();
        assert_eq!(err.to_string(), "Deadline must be a valid date");
    }
}
