// fieldrules/src/lib.rs
//! # fieldrules CLI
//!
//! Command-line access to the field type rules in `fieldrules-core`:
//! listing rule descriptors, sanitising and validating values, and
//! formatting phone numbers for display.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
