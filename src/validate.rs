use chrono::NaiveDate;

use crate::error::ValidationError;

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_DESCRIPTION_CHARS: usize = 200;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a task name: must contain a non-whitespace character and be at
/// most [`MAX_NAME_CHARS`] characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong {
            len,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong {
            len,
            max: MAX_DESCRIPTION_CHARS,
        });
    }
    Ok(())
}

/// Check both editable text fields before a create or update.
pub fn validate_task(name: &str, description: &str) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_description(description)
}

pub fn parse_due_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(validate_name("Buy milk").is_ok());
        assert!(validate_name("x").is_ok());
        assert!(validate_name(&"a".repeat(MAX_NAME_CHARS)).is_ok());
    }

    #[test]
    fn invalid_names() {
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(
            validate_name(&"a".repeat(MAX_NAME_CHARS + 1)),
            Err(ValidationError::NameTooLong { len: 51, max: 50 })
        );
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        // 50 two-byte characters
        assert!(validate_name(&"é".repeat(MAX_NAME_CHARS)).is_ok());
        assert!(validate_description(&"ữ".repeat(MAX_DESCRIPTION_CHARS)).is_ok());
    }

    #[test]
    fn description_limit() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_CHARS + 1)).is_err());
        assert!(validate_task("ok", &"d".repeat(MAX_DESCRIPTION_CHARS + 1)).is_err());
    }

    #[test]
    fn due_dates() {
        assert_eq!(
            parse_due_date("2024-06-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
        assert_eq!(
            parse_due_date(" 2024-06-10 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
        assert!(parse_due_date("2024-02-30").is_err());
        assert!(parse_due_date("10/06/2024").is_err());
        assert!(parse_due_date("").is_err());
    }
}
