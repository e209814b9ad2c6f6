//! errors.rs - Custom error types for the fieldrules-core library.
//!
//! This module defines a structured error enum for the library. Validation
//! failures are not errors: they are returned as non-empty message strings.
//! The variants here cover programming and configuration mistakes only.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `fieldrules-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FieldRuleError {
    /// A lookup used a key that is not present in the registry.
    #[error("Unknown field type '{0}'")]
    UnknownFieldType(String),

    #[error("Failed to compile pattern for field rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid field rule configuration: {0}")]
    InvalidConfig(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
