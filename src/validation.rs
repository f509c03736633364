use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Returns the trimmed value, or `Missing` when absent or blank.
pub(crate) fn required(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ValidationError::Missing(field)),
    }
}

/// Like `required` but keeps surrounding whitespace, for passwords.
pub(crate) fn required_raw(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Missing(field)),
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Parses a strictly positive, finite number.
pub(crate) fn positive_number(
    value: Option<String>,
    field: &'static str,
) -> Result<f64, ValidationError> {
    let raw = required(value, field)?;
    let n: f64 = raw
        .parse()
        .map_err(|_| ValidationError::NotANumber(field))?;
    if !n.is_finite() {
        return Err(ValidationError::NotANumber(field));
    }
    if n <= 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_and_missing() {
        assert_eq!(required(None, "name"), Err(ValidationError::Missing("name")));
        assert_eq!(
            required(Some("   ".into()), "name"),
            Err(ValidationError::Missing("name"))
        );
        assert_eq!(required(Some(" Ana ".into()), "name").unwrap(), "Ana");
    }

    #[test]
    fn positive_number_rules() {
        assert_eq!(positive_number(Some("70.5".into()), "Weight").unwrap(), 70.5);
        assert_eq!(
            positive_number(Some("abc".into()), "Weight"),
            Err(ValidationError::NotANumber("Weight"))
        );
        assert_eq!(
            positive_number(Some("NaN".into()), "Weight"),
            Err(ValidationError::NotANumber("Weight"))
        );
        assert_eq!(
            positive_number(Some("inf".into()), "Weight"),
            Err(ValidationError::NotANumber("Weight"))
        );
        assert_eq!(
            positive_number(Some("0".into()), "Height"),
            Err(ValidationError::NotPositive("Height"))
        );
        assert_eq!(
            positive_number(Some("-3".into()), "Height"),
            Err(ValidationError::NotPositive("Height"))
        );
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@fitzone.io"));
        assert!(!is_valid_email("ana@fitzone"));
        assert!(!is_valid_email("ana fitzone.io"));
        assert_eq!(normalize_email("  Ana@FitZone.IO "), "ana@fitzone.io");
    }
}
