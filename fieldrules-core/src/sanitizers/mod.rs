//! Keystroke sanitisation and rule compilation for fieldrules.
//!
//! `pipeline` holds the sanitiser functions themselves; every one of them is
//! infallible and idempotent. `compiler` turns rule descriptors from `config`
//! into compiled rules that pair a sanitiser with a validator.

pub mod compiler;
pub mod pipeline;
