//! Field rule command implementations: list, show, sanitise, validate and
//! format-phone.
//!
//! Every runner writes to the writer it is given so the CLI and the tests
//! share the same code path.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, BufRead, Write};

use fieldrules_core::{format_phone, FieldBehaviour, Registry};

use crate::ui::output_format;

/// Returns the given value, or every line of stdin when there is none.
pub fn collect_values(value: Option<String>) -> Result<Vec<String>> {
    match value {
        Some(value) => Ok(vec![value]),
        None => {
            debug!("No value given, reading values from stdin.");
            read_lines(io::stdin().lock())
        }
    }
}

/// Reads each line of `reader`, without its line terminator.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .map(|line| line.context("Failed to read input line"))
        .collect()
}

/// Writes one line per field type: key then description.
pub fn run_list<W: Write>(registry: &Registry, writer: &mut W) -> Result<()> {
    if let Some(locale) = registry.locale() {
        info!("Listing {} field rules for locale {}.", registry.len(), locale);
    }
    for rule in registry.rules() {
        match &rule.description {
            Some(description) => writeln!(writer, "{:<16}{}", rule.key, description)?,
            None => writeln!(writer, "{}", rule.key)?,
        }
    }
    Ok(())
}

/// Writes the rendering descriptor of `key`, as text or JSON.
pub fn run_show<W: Write>(
    registry: &Registry,
    key: &str,
    json: bool,
    writer: &mut W,
    enable_colors: bool,
) -> Result<()> {
    let descriptor = registry.get_rule(key)?;

    if json {
        serde_json::to_writer_pretty(&mut *writer, &descriptor)
            .context("Failed to serialise field rule descriptor")?;
        writeln!(writer)?;
        return Ok(());
    }

    output_format::print_field(writer, "key", &descriptor.key, enable_colors)?;
    output_format::print_field(writer, "description", descriptor.description.as_deref().unwrap_or(""), enable_colors)?;
    output_format::print_field(writer, "pattern", &descriptor.pattern, enable_colors)?;
    output_format::print_field(writer, "html", &descriptor.html_pattern, enable_colors)?;
    output_format::print_field(writer, "placeholder", &descriptor.placeholder, enable_colors)?;
    output_format::print_field(writer, "error", &descriptor.error, enable_colors)?;
    output_format::print_field(writer, "pre icon", &descriptor.pre_icon, enable_colors)?;
    output_format::print_field(writer, "post icon", &descriptor.post_icon, enable_colors)?;
    Ok(())
}

/// Writes the sanitised form of each value on its own line.
pub fn run_sanitise<W: Write>(registry: &Registry, key: &str, values: &[String], writer: &mut W) -> Result<()> {
    let rule = registry.lookup(key)?;
    for value in values {
        writeln!(writer, "{}", rule.sanitise(value))?;
    }
    Ok(())
}

/// Validates each value and writes a status line for it.
///
/// Returns the number of values that failed validation.
pub fn run_validate<W: Write>(
    registry: &Registry,
    key: &str,
    values: &[String],
    sanitise_first: bool,
    writer: &mut W,
    enable_colors: bool,
) -> Result<usize> {
    let rule = registry.lookup(key)?;
    let mut failures = 0;

    for raw in values {
        let value = if sanitise_first { rule.sanitise(raw) } else { raw.clone() };
        let message = rule.validate(&value);
        if message.is_empty() {
            output_format::print_valid(writer, &value, enable_colors)?;
        } else {
            failures += 1;
            output_format::print_invalid(writer, &value, &message, enable_colors)?;
        }
    }

    debug!("Validated {} value(s) as '{}': {} failed.", values.len(), key, failures);
    Ok(failures)
}

/// Writes the display form of each phone number on its own line.
pub fn run_format_phone<W: Write>(values: &[String], writer: &mut W) -> Result<()> {
    for value in values {
        writeln!(writer, "{}", format_phone(value))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn reads_lines_without_terminators() {
        let lines = read_lines("0412 345 678\r\n2O01x\n".as_bytes()).unwrap();
        assert_eq!(lines, ["0412 345 678", "2O01x"]);
    }

    #[test]
    fn lists_keys_in_table_order() {
        let text = run(|out| run_list(Registry::global(), out));
        let keys: Vec<&str> = text.lines().map(|l| l.split_whitespace().next().unwrap()).collect();
        assert_eq!(keys.first(), Some(&"anyphone"));
        assert!(keys.contains(&"addressline"));
        assert_eq!(keys.len(), Registry::global().len());
    }

    #[test]
    fn show_json_round_trips_descriptor() {
        let text = run(|out| run_show(Registry::global(), "money", true, out, false));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["key"], "money");
        assert_eq!(value["pre_icon"], "attach_money");
        assert_eq!(value["error"], "Please enter a valid dollar amount");
    }

    #[test]
    fn show_unknown_key_fails() {
        let mut out = Vec::new();
        let err = run_show(Registry::global(), "shoesize", false, &mut out, false).unwrap_err();
        assert!(err.to_string().contains("Unknown field type 'shoesize'"));
    }

    #[test]
    fn sanitises_each_value() {
        let values = vec!["04a12-345.678".to_string(), "(02) 9876 5432".to_string()];
        let text = run(|out| run_sanitise(Registry::global(), "anyphone", &values, out));
        assert_eq!(text, "0412345678\n0298765432\n");
    }

    #[test]
    fn validate_counts_failures() {
        let values = vec!["2001".to_string(), "0100".to_string(), "2O01x".to_string()];
        let mut out = Vec::new();
        let failures = run_validate(Registry::global(), "postcode", &values, false, &mut out, false).unwrap();
        assert_eq!(failures, 2);

        let mut out = Vec::new();
        let failures = run_validate(Registry::global(), "postcode", &values, true, &mut out, false).unwrap();
        assert_eq!(failures, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("valid: 2001\n"));
        assert!(text.contains("invalid: 0100 (Please enter a valid Australian post code)"));
    }

    #[test]
    fn formats_phone_numbers() {
        let values = vec!["0412345678".to_string(), "0298765432".to_string(), "123".to_string()];
        let text = run(|out| run_format_phone(&values, out));
        assert_eq!(text, "0412 345 678\n02 9876 5432\n123\n");
    }
}
