// fieldrules/src/ui/output_format.rs
//! Styled status lines for the fieldrules CLI.
//!
//! Colour is only applied when the caller says the target supports it.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes a validation success line for `value`.
pub fn print_valid<W: Write>(writer: &mut W, value: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", "valid:".green().bold(), value)
    } else {
        writeln!(writer, "valid: {}", value)
    }
}

/// Writes a validation failure line carrying the rule's error message.
pub fn print_invalid<W: Write>(writer: &mut W, value: &str, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {} ({})", "invalid:".red().bold(), value, message.red())
    } else {
        writeln!(writer, "invalid: {} ({})", value, message)
    }
}

/// Writes an informational message.
pub fn print_info_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{}", message.cyan())
    } else {
        writeln!(writer, "{}", message)
    }
}

/// Writes an error message.
pub fn print_error_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", "error:".red().bold(), message)
    } else {
        writeln!(writer, "error: {}", message)
    }
}

/// Writes a `label: value` line, skipping empty values.
pub fn print_field<W: Write>(writer: &mut W, label: &str, value: &str, enable_colors: bool) -> io::Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    if enable_colors {
        writeln!(writer, "{:>12} {}", format!("{label}:").bold(), value)
    } else {
        writeln!(writer, "{:>12} {}", format!("{label}:"), value)
    }
}
