//! Human-readable formatting for canonical field values.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;

static MOBILE_GROUPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[45][0-9]{2})([0-9]{3})([0-9]{3})$").expect("mobile grouping is valid"));

static FIXED_LINE_GROUPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1236789])([0-9]{4})([0-9]{4})$").expect("fixed line grouping is valid"));

/// Formats an Australian phone number for display.
///
/// Mobile numbers (`04`/`05`) are grouped as `XXXX XXX XXX` and fixed line
/// numbers as `XX XXXX XXXX`. Anything that is not a complete number is
/// returned as its digits, unformatted.
///
/// ```rust
/// use fieldrules_core::format_phone;
///
/// assert_eq!(format_phone("0412345678"), "0412 345 678");
/// assert_eq!(format_phone("(02) 9876-5432"), "02 9876 5432");
/// assert_eq!(format_phone("04123"), "04123");
/// ```
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    let groups = if digits.starts_with("04") || digits.starts_with("05") {
        &*MOBILE_GROUPS
    } else {
        &*FIXED_LINE_GROUPS
    };

    groups.replace(&digits, "$1 $2 $3").into_owned()
}

/// Joins the non-empty, trimmed fragments of an address into a single line.
pub fn address_to_human<'a, I>(fragments: I, sep: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    fragments
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_mobile_numbers() {
        assert_eq!(format_phone("0412345678"), "0412 345 678");
        assert_eq!(format_phone("0512 345 678"), "0512 345 678");
    }

    #[test]
    fn formats_fixed_line_numbers() {
        assert_eq!(format_phone("0298765432"), "02 9876 5432");
        assert_eq!(format_phone("0712345678"), "07 1234 5678");
        assert_eq!(format_phone("0112345678"), "01 1234 5678");
    }

    #[test]
    fn leaves_incomplete_numbers_unformatted() {
        assert_eq!(format_phone("029876"), "029876");
        assert_eq!(format_phone("04123456789"), "04123456789");
        assert_eq!(format_phone("0412-345"), "0412345");
        assert_eq!(format_phone("0412345678"), format_phone(&format_phone("0412345678")));
        assert_eq!(format_phone("1234567890"), "1234567890");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn joins_address_fragments() {
        let fragments = [Some(" 12 Smith St "), None, Some(""), Some("Sydney"), Some("NSW  "), Some("2000")];
        assert_eq!(address_to_human(fragments, " "), "12 Smith St Sydney NSW 2000");
        assert_eq!(address_to_human(fragments, ", "), "12 Smith St, Sydney, NSW, 2000");
        assert_eq!(address_to_human([None, Some("  ")], " "), "");
    }
}
