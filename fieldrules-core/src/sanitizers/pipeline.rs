//! pipeline.rs - Keystroke sanitisers for field values.
//!
//! Every function here is infallible and idempotent: feeding the output back
//! in returns it unchanged, so callers can run them on every keystroke.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FieldRuleError;

/// Leading zeros followed by a non-zero digit, or by `0.`.
static LEADING_ZEROS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0*(0\.|[1-9])").expect("leading zero pattern is valid"));

/// Separators allowed in a name. A run of identical separators collapses to one.
const NAME_SEPARATORS: &[char] = &[' ', '-', '.', '\''];

/// Longest run of mixed separators kept in a name.
const MAX_NAME_SEPARATOR_RUN: usize = 3;

/// Punctuation allowed in a title. A run of one of these repeated collapses to one.
const TITLE_PUNCTUATION: &[char] = &['&', ',', ' ', '-', '_', '.', '?', ':', '!', '\'', '(', ')'];

/// Punctuation allowed in an address line besides ASCII letters and digits.
const ADDRESS_PUNCTUATION: &[char] = &[' ', ',', '.', '(', ')', '/', '\'', '-'];

/// A capture-group regex whose first group becomes the whole value when it matches.
#[derive(Debug, Clone)]
pub struct RegexReplacement {
    regex: Regex,
}

impl RegexReplacement {
    /// Compiles an extraction rule. The pattern must declare a capture group.
    pub fn new(rule_key: &str, source: &str) -> Result<Self, FieldRuleError> {
        let regex = Regex::new(source)
            .map_err(|e| FieldRuleError::RuleCompilationError(rule_key.to_string(), e))?;
        if regex.captures_len() < 2 {
            return Err(FieldRuleError::InvalidConfig(format!(
                "rule '{rule_key}': extraction rule '{source}' has no capture group"
            )));
        }
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the first capture group when the rule matches, or the input unchanged.
    pub fn apply(&self, input: &str) -> String {
        match self.regex.captures(input) {
            Some(caps) => caps.get(1).map_or_else(String::new, |m| m.as_str().to_string()),
            None => input.to_string(),
        }
    }
}

fn truncate_chars(input: &str, max_length: usize) -> String {
    input.chars().take(max_length).collect()
}

/// Sanitises any positive number.
///
/// Non-numeric characters are stripped, along with a decimal point that comes
/// before any digit or after the first one. Unwanted leading zeros are removed,
/// each extraction rule is applied in order and the result is truncated to
/// `max_length` characters when one is given.
pub fn sanitise_numeric(
    input: &str,
    extraction_rules: &[RegexReplacement],
    max_length: Option<usize>,
) -> String {
    let mut seen_digit = false;
    let mut seen_point = false;
    let digits: String = input
        .chars()
        .filter(|&c| match c {
            '0'..='9' => {
                seen_digit = true;
                true
            }
            '.' if seen_digit && !seen_point => {
                seen_point = true;
                true
            }
            _ => false,
        })
        .collect();

    let mut output = LEADING_ZEROS.replacen(&digits, 1, "$1").into_owned();

    for rule in extraction_rules {
        output = rule.apply(&output);
    }

    match max_length {
        Some(max) if max > 0 => truncate_chars(&output, max),
        _ => output,
    }
}

/// Inputs run through [`sanitise_numeric`] when checking a rule for idempotence.
const NUMERIC_SAMPLES: &[&str] = &[
    "0", "7", "12", "12.", "12.5", "12.345", "0.05", "007.50", "123", "1234567", "12345678.901", "99999999999",
];

/// Returns the first sample whose sanitised form changes when sanitised again.
///
/// Extraction rules are user data; an extraction that does not keep a prefix of
/// the value it was given can make the pipeline rewrite its own output.
pub fn unstable_numeric_sample(extraction_rules: &[RegexReplacement], max_length: Option<usize>) -> Option<&'static str> {
    NUMERIC_SAMPLES.iter().copied().find(|sample| {
        let once = sanitise_numeric(sample, extraction_rules, max_length);
        sanitise_numeric(&once, extraction_rules, max_length) != once
    })
}

/// Keeps ASCII digits only, truncated to `max_length` characters.
pub fn sanitise_digits(input: &str, max_length: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max_length).collect()
}

/// Keeps digits and a single leading `+`, truncated to `max_length` characters.
pub fn sanitise_intl_phone(input: &str, max_length: usize) -> String {
    let mut output = String::with_capacity(input.len().min(max_length));
    for c in input.chars() {
        if c.is_ascii_digit() || (c == '+' && output.is_empty()) {
            output.push(c);
        }
    }
    truncate_chars(&output, max_length)
}

/// Cleans a personal name.
///
/// Each disallowed character becomes a space, a separator repeating the one
/// before it is dropped and a run of mixed separators is capped.
pub fn sanitise_name(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut run = 0;

    for c in input.chars() {
        let c = if c.is_ascii_alphabetic() || NAME_SEPARATORS.contains(&c) { c } else { ' ' };

        if !NAME_SEPARATORS.contains(&c) {
            output.push(c);
            run = 0;
            continue;
        }

        if output.ends_with(c) || run >= MAX_NAME_SEPARATOR_RUN {
            continue;
        }
        output.push(c);
        run += 1;
    }

    output
}

/// Cleans a free text title: disallowed characters are removed and repeated
/// punctuation collapses to a single character.
pub fn sanitise_title(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            output.push(c);
        } else if TITLE_PUNCTUATION.contains(&c) && !output.ends_with(c) {
            output.push(c);
        }
    }

    output
}

/// Removes every character outside the address line allow-list.
pub fn sanitise_address_line(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ADDRESS_PUNCTUATION.contains(c))
        .collect()
}
