//! Command implementations for the fieldrules CLI.

pub mod fields;
