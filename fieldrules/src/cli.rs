// fieldrules/src/cli.rs
//! This file defines the command-line interface (CLI) for the fieldrules
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "fieldrules",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check and clean form field values",
    long_about = "fieldrules applies the field type rules used by form inputs (phone numbers, email addresses, post codes, money, percentages, names, passwords and more) to values given on the command line or on stdin. Values can be sanitised into their canonical form, validated, or formatted for display.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// A YAML file of field rules merged over the built-in table.
    #[arg(
        long = "rules",
        value_name = "FILE",
        global = true,
        env = "FIELDRULES_RULES",
        help = "Merge field rules from a YAML file over the built-in table."
    )]
    pub rules: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `fieldrules` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists every field type in the active rule table.
    #[command(about = "List every field type in the active rule table.")]
    List,

    /// Shows the rendering descriptor of a field type.
    #[command(about = "Show the pattern, placeholder, error message and icons of a field type.")]
    Show {
        /// The field type key (e.g. "mobilephone").
        #[arg(value_name = "KEY")]
        key: String,

        /// Print the descriptor as JSON.
        #[arg(long, help = "Print the descriptor as JSON.")]
        json: bool,
    },

    /// Sanitises values into the canonical form of a field type.
    #[command(about = "Sanitise values into the canonical form of a field type (reads stdin lines if no value is given).")]
    Sanitise(FieldValueArgs),

    /// Validates values against a field type.
    #[command(about = "Validate values against a field type (reads stdin lines if no value is given).")]
    Validate {
        #[command(flatten)]
        args: FieldValueArgs,

        /// Sanitise each value before validating it.
        #[arg(long, short = 's', help = "Sanitise each value before validating it.")]
        sanitise: bool,
    },

    /// Formats Australian phone numbers for display.
    #[command(about = "Format Australian phone numbers for display (reads stdin lines if no value is given).")]
    FormatPhone {
        /// The phone number to format.
        #[arg(value_name = "VALUE")]
        value: Option<String>,
    },
}

/// A field type key and an optional value.
#[derive(Parser, Debug)]
pub struct FieldValueArgs {
    /// The field type key (e.g. "money").
    #[arg(value_name = "KEY")]
    pub key: String,

    /// The value to process. Each stdin line is processed when omitted.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: Option<String>,
}
