use crate::error::{CrmError, CrmResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> CrmResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(CrmError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Syntactic email check: one `@`, non-empty local part, and a domain with
/// at least one interior dot. Returns the trimmed address on success.
pub fn email(value: &str) -> CrmResult<String> {
    let trimmed = value.trim();
    let invalid = || CrmError::InvalidEmail {
        value: trimmed.to_string(),
    };

    if trimmed.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return Err(invalid()),
    };
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Validates an email field that is allowed to be empty. A blank value is
/// accepted and normalized to the empty string.
pub fn optional_email(value: &str) -> CrmResult<String> {
    if value.trim().is_empty() {
        Ok(String::new())
    } else {
        email(value)
    }
}

/// Validates that an integer is positive (> 0).
pub fn positive(value: i64, field: &str) -> CrmResult<i64> {
    if value <= 0 {
        Err(CrmError::NonPositive {
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_accepts_valid_string() {
        assert_eq!(non_blank("hello", "name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  hello  ", "name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_rejects_empty() {
        assert!(non_blank("", "name").is_err());
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   ", "name").is_err());
    }

    #[test]
    fn email_accepts_plain_address() {
        assert_eq!(email("jane@example.com").unwrap(), "jane@example.com");
    }

    #[test]
    fn email_trims_whitespace() {
        assert_eq!(email("  jane@example.com  ").unwrap(), "jane@example.com");
    }

    #[test]
    fn email_rejects_missing_at() {
        assert!(email("not-an-email").is_err());
    }

    #[test]
    fn email_rejects_missing_local_part() {
        assert!(email("@example.com").is_err());
    }

    #[test]
    fn email_rejects_dotless_domain() {
        assert!(email("jane@example").is_err());
    }

    #[test]
    fn email_rejects_double_at() {
        assert!(email("jane@@example.com").is_err());
    }

    #[test]
    fn email_rejects_interior_whitespace() {
        assert!(email("jane doe@example.com").is_err());
    }

    #[test]
    fn optional_email_accepts_blank() {
        assert_eq!(optional_email("   ").unwrap(), "");
    }

    #[test]
    fn optional_email_still_validates_non_blank() {
        assert!(optional_email("nope").is_err());
    }

    #[test]
    fn positive_accepts_positive() {
        assert_eq!(positive(5, "id").unwrap(), 5);
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(positive(0, "id").is_err());
    }

    #[test]
    fn positive_rejects_negative() {
        assert!(positive(-1, "id").is_err());
    }

    #[test]
    fn trim_optional_trims() {
        assert_eq!(trim_optional(Some("  hi  ")), Some("hi".to_string()));
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
    }
}
