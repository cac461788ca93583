use regex::Regex;
use std::sync::LazyLock;

/// Number of digits in a valid phone number.
const PHONE_DIGITS: usize = 10;

/// Area code, exchange and line number of a sanitized phone.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)\A(\d{3})(\d{3})(\d{4})\z").expect("phone regex is valid"));

/// Strips every non-digit character from `phone`. An absent phone yields an empty string.
pub fn sanitize_phone(phone: Option<&str>) -> String {
    phone
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

/// Returns whether `phone` sanitizes to exactly ten digits grouped as 3-3-4.
pub fn is_valid_phone(phone: Option<&str>) -> bool {
    let sanitized = sanitize_phone(phone);
    sanitized.len() == PHONE_DIGITS && PHONE_REGEX.is_match(&sanitized)
}

/// Formats `phone` as `(AAA) BBB-CCCC`, or returns [`None`] when it is not a valid phone.
pub fn format_phone(phone: Option<&str>) -> Option<String> {
    let sanitized = sanitize_phone(phone);
    let captures = PHONE_REGEX.captures(&sanitized)?;

    Some(format!(
        "({}) {}-{}",
        &captures[1], &captures[2], &captures[3]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_formatting() {
        assert_eq!(sanitize_phone(Some("123-456-7890")), "1234567890");
        assert_eq!(sanitize_phone(Some("+1 (415) 555.1212")), "14155551212");
        assert_eq!(sanitize_phone(Some("no digits")), "");
        assert_eq!(sanitize_phone(None), "");
    }

    #[test]
    fn sanitize_keeps_only_ascii_digits() {
        // Arabic-Indic digits are numeric but not part of a dialable number here.
        assert_eq!(sanitize_phone(Some("١٢٣-456")), "456");
    }

    #[test]
    fn valid_phone_requires_exactly_ten_digits() {
        assert!(is_valid_phone(Some("1234567890")));
        assert!(is_valid_phone(Some("(123) 456-7890")));
        assert!(!is_valid_phone(Some("123456789")));
        assert!(!is_valid_phone(Some("+1 123 456 7890")));
        assert!(!is_valid_phone(Some("")));
        assert!(!is_valid_phone(None));
    }

    #[test]
    fn format_groups_digits() {
        assert_eq!(
            format_phone(Some("1234567890")).as_deref(),
            Some("(123) 456-7890")
        );
        assert_eq!(
            format_phone(Some("123.456.7890")).as_deref(),
            Some("(123) 456-7890")
        );
    }

    #[test]
    fn format_has_no_fallback_for_invalid_phones() {
        assert_eq!(format_phone(Some("123")), None);
        assert_eq!(format_phone(Some("12345678901")), None);
        assert_eq!(format_phone(None), None);
    }
}
