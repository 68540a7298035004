//! Input checks shared by the submission forms.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("valid regex"));
static PHONE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-()]").expect("valid regex"));

/// `local@domain.tld` shape, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Optional leading `+`, first digit 1-9, up to 15 more ASCII digits. Spaces, hyphens and
/// parentheses are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let cleaned = PHONE_PUNCTUATION.replace_all(phone, "");
    PHONE.is_match(&cleaned)
}

/// True when the trimmed value has at least `min` characters.
pub fn has_min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("a.b+c@mail.school.in"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("as ha@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phones() {
        assert!(is_valid_phone("+91 98765-43210"));
        assert!(is_valid_phone("(22) 2345 6789"));
        assert!(is_valid_phone("9"));
        assert!(!is_valid_phone("0987654321"));
        assert!(!is_valid_phone("+91 98765 4321O"));
        assert!(!is_valid_phone("12345678901234567"));
        assert!(!is_valid_phone("9८७६५४३२१०"));
        assert!(!is_valid_phone("+91 ٩٨٧٦٥"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn lengths_count_trimmed_characters() {
        assert!(has_min_chars("  Jo ", 2));
        assert!(!has_min_chars("  J  ", 2));
        assert!(has_min_chars("नमस्ते", 2));
        assert!(is_blank(" \t\n"));
    }
}
