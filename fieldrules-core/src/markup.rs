//! Derivation of HTML `pattern` attribute strings from rule patterns.
//!
//! Browsers compile the `pattern` attribute with the `u` or `v` regex flag,
//! which reject some literal characters inside character classes. Rule
//! patterns are written once in plain regex syntax; [`html_pattern`] adds the
//! escapes markup needs so the attribute value can be emitted verbatim.
//!
//! License: MIT OR APACHE 2.0

/// Characters escaped when they appear literally inside a character class.
const CLASS_ESCAPES: &[char] = &['(', ')', '[', '{', '}', '/', '|', '.', '?', '*', '+', '$'];

/// Returns the markup-safe form of a regex pattern.
///
/// Inside character classes, literal `( ) [ { } / | . ? * + $` and any `-` that
/// is not a range operator are escaped. Outside classes `/` is escaped.
/// Existing escapes are copied unchanged.
///
/// ```rust
/// use fieldrules_core::markup::html_pattern;
///
/// assert_eq!(html_pattern(r"^[a-zA-Z .'-]+$"), r"^[a-zA-Z \.'\-]+$");
/// ```
pub fn html_pattern(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 8);
    let mut chars = source.chars().peekable();

    let mut in_class = false;
    let mut at_class_start = false;
    let mut can_open_range = false;
    let mut closing_range = false;

    while let Some(c) = chars.next() {
        if !in_class {
            match c {
                '\\' => {
                    out.push(c);
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '[' => {
                    out.push(c);
                    if chars.peek() == Some(&'^') {
                        out.push('^');
                        chars.next();
                    }
                    in_class = true;
                    at_class_start = true;
                    can_open_range = false;
                    closing_range = false;
                }
                '/' => out.push_str("\\/"),
                _ => out.push(c),
            }
            continue;
        }

        match c {
            ']' if !at_class_start => {
                out.push(c);
                in_class = false;
                continue;
            }
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '-' if can_open_range && chars.peek().is_some_and(|&next| next != ']') => {
                out.push(c);
                can_open_range = false;
                closing_range = true;
                continue;
            }
            '-' | ']' => {
                out.push('\\');
                out.push(c);
            }
            c if CLASS_ESCAPES.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }

        // A class member was written. It may open a range unless it closed one.
        at_class_start = false;
        can_open_range = !closing_range;
        closing_range = false;
    }

    out
}
