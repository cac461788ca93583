use regex::Regex;
use std::sync::LazyLock;

/// Accepted email shape: word, `+`, `-` or `.` characters, an `@`, a domain made of letters,
/// digits, `-` or `.`, and a letter-only TLD. Matching is case-insensitive over ASCII classes.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\A[\w+\-.]+@[a-z\d\-.]+\.[a-z]+\z").expect("email regex is valid")
});

/// Returns whether `email` is present and a valid address.
pub fn is_valid_email(email: Option<&str>) -> bool {
    email.is_some_and(|email| EMAIL_REGEX.is_match(email))
}
