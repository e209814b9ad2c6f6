// fieldrules-core/src/lib.rs
//! # fieldrules Core Library
//!
//! `fieldrules-core` provides the platform-independent logic behind form
//! field types: a registry of rules (phone numbers, email, post codes, money,
//! percentages, names, titles, passwords, URLs and address lines), each
//! carrying a pattern, a placeholder, an error message, an optional
//! sanitiser that cleans keystrokes into a canonical form, and a validator.
//!
//! The library is pure and stateless. Sanitisers never fail and are
//! idempotent, so they can run on every keystroke; validators return an
//! error message, or an empty string when the value is acceptable.
//!
//! ## Modules
//!
//! * `config`: Serialisable rule descriptors, the embedded default table, override files and merging.
//! * `sanitizers`: The sanitiser pipeline and the compiler that turns descriptors into rules.
//! * `validators`: The email heuristic and the password policy.
//! * `formatters`: Human-readable phone numbers and addresses.
//! * `markup`: Derivation of HTML `pattern` attribute strings.
//! * `engine`: The `FieldBehaviour` trait and `RuleDescriptor`.
//! * `registry`: The immutable key to rule lookup table.
//!
//! ## Usage Example
//!
//! ```rust
//! use fieldrules_core::{format_phone, sanitise, validate};
//!
//! fn main() -> Result<(), fieldrules_core::FieldRuleError> {
//!     let typed = sanitise("mobilephone", "04a12-345.678")?;
//!     assert_eq!(typed, "0412345678");
//!     assert_eq!(validate("mobilephone", &typed)?, "");
//!     assert_eq!(format_phone(&typed), "0412 345 678");
//!
//!     assert_eq!(validate("money", "12.5")?, "Please enter a valid dollar amount");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Looking up a key that is not in the registry is a programming error and is
//! returned as [`FieldRuleError::UnknownFieldType`]. Configuration loading uses
//! `anyhow::Error` with context. A failed validation is not an error: it is a
//! non-empty message string.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod errors;
pub mod formatters;
pub mod markup;
pub mod registry;
pub mod sanitizers;
pub mod validators;

/// Re-exports the configuration types and functions for managing field rules.
pub use config::{
    merge_rules,
    validate_rules,
    FieldConfig,
    FieldRuleConfig,
    SanitiserConfig,
    ValidatorKind,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::FieldRuleError;

/// Re-exports the capability interface implemented by every field rule.
pub use engine::{FieldBehaviour, RuleDescriptor};

/// Re-exports the registry and the lookups over the default rule table.
pub use registry::{get_rule, sanitise, validate, validate_email, validate_password, Registry};

pub use formatters::{address_to_human, format_phone};
pub use markup::html_pattern;
pub use sanitizers::compiler::{compile_rule, compile_rules, CompiledRule, Sanitiser, Validator};
pub use sanitizers::pipeline::{sanitise_numeric, RegexReplacement};
