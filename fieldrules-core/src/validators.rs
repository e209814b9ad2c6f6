// File: fieldrules-core/src/validators.rs
//! Programmatic validation functions for field types that a pattern alone
//! cannot describe.
//!
//! The email check layers heuristic rejections (placeholder addresses, IP
//! literals, embedded ports) on top of the rule's pattern. The password check
//! is a character-class and length policy. Both return the rule's error
//! message on failure and an empty string on success.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use regex::Regex;

/// Longest email address accepted, after trimming.
pub const MAX_EMAIL_LENGTH: usize = 192;

/// Substrings that mark an email address as a placeholder.
pub const PLACEHOLDER_EMAIL_WORDS: &[&str] = &["example", "test"];

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 64;

/// A password must contain at least one of these characters.
pub const PASSWORD_SPECIAL_CHARS: &str = "`~!@#$%^&*()-=_+{}|:\";'<>?,./\\[]";

lazy_static! {
    static ref IPV4_LITERAL: Regex = Regex::new(
        r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3}"
    )
    .unwrap();
    static ref EMBEDDED_PORT: Regex = Regex::new(r":[0-9]{1,5}").unwrap();
}

/// Validates an email address against the heuristic rejection steps and the
/// canonical `shape` pattern, returning `message` on the first failure.
///
/// # Arguments
///
/// * `email` - The raw value entered by the user.
/// * `shape` - The compiled email pattern of the rule.
/// * `message` - The error text returned on failure.
pub fn check_email(email: &str, shape: &Regex, message: &str) -> String {
    let email = email.trim();

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return message.to_string();
    }

    let lowered = email.to_lowercase();
    let mut parts = lowered.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return message.to_string();
    };

    let domain = domain.trim();
    if local.trim().is_empty() || domain.is_empty() {
        return message.to_string();
    }

    if PLACEHOLDER_EMAIL_WORDS.iter().any(|word| lowered.contains(word)) {
        return message.to_string();
    }

    if IPV4_LITERAL.is_match(domain) || EMBEDDED_PORT.is_match(domain) {
        return message.to_string();
    }

    if shape.is_match(&lowered) {
        String::new()
    } else {
        message.to_string()
    }
}

/// Checks a password against the length and character-class policy,
/// returning `message` when any requirement is not met.
pub fn check_password(password: &str, message: &str) -> String {
    let length = password.chars().count();
    let long_enough = (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length);
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    if long_enough && has_upper && has_digit && has_special {
        String::new()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSG: &str = "bad";

    fn shape() -> Regex {
        Regex::new(r"^[a-z0-9_.'-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*(?:\.[a-z]+){1,2}$").unwrap()
    }

    #[test]
    fn email_accepts_plain_address() {
        assert_eq!(check_email("a@b.com", &shape(), MSG), "");
        assert_eq!(check_email("  Jo.O'Neil@Mail.Co.Uk ", &shape(), MSG), "");
    }

    #[test]
    fn email_rejects_structure() {
        for input in ["", "@", "a@", "@b.com", "a@b@c.com", " @b.com", "a@ "] {
            assert_eq!(check_email(input, &shape(), MSG), MSG, "{input:?}");
        }
    }

    #[test]
    fn email_rejects_placeholders() {
        assert_eq!(check_email("a@test.com", &shape(), MSG), MSG);
        assert_eq!(check_email("robbie@EXAMPLE.com", &shape(), MSG), MSG);
        assert_eq!(check_email("contestant@b.com", &shape(), MSG), MSG);
    }

    #[test]
    fn email_rejects_ip_literal_and_port() {
        assert_eq!(check_email("a@192.168.0.1", &shape(), MSG), MSG);
        assert_eq!(check_email("a@10.0.0.254.au", &shape(), MSG), MSG);
        assert_eq!(check_email("a@b.com:8080", &shape(), MSG), MSG);
    }

    #[test]
    fn email_rejects_overlong_address() {
        let long = format!("{}@b.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert_eq!(check_email(&long, &shape(), MSG), MSG);
        let fits = format!("{}@b.com", "a".repeat(MAX_EMAIL_LENGTH - 6));
        assert_eq!(check_email(&fits, &shape(), MSG), "");
    }

    #[test]
    fn email_rejects_bad_shape() {
        assert_eq!(check_email("a b@c.com", &shape(), MSG), MSG);
        assert_eq!(check_email("a@b", &shape(), MSG), MSG);
        assert_eq!(check_email("a@b.c0m", &shape(), MSG), MSG);
    }

    #[test]
    fn password_policy() {
        assert_eq!(check_password("Abcdefg1!", MSG), "");
        assert_eq!(check_password("abcdefg1!", MSG), MSG);
        assert_eq!(check_password("Abcdefgh!", MSG), MSG);
        assert_eq!(check_password("Abcdefgh1", MSG), MSG);
        assert_eq!(check_password("short1!", MSG), MSG);
        assert_eq!(check_password("Ab1\\defg", MSG), "");
    }

    #[test]
    fn password_length_bounds() {
        let at_max = format!("A1!{}", "a".repeat(MAX_PASSWORD_LENGTH - 3));
        assert_eq!(check_password(&at_max, MSG), "");
        let over = format!("A1!{}", "a".repeat(MAX_PASSWORD_LENGTH - 2));
        assert_eq!(check_password(&over, MSG), MSG);
        assert_eq!(check_password("Abcde1!", MSG), MSG);
        assert_eq!(check_password("Abcdef1!", MSG), "");
    }
}
