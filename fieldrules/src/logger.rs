// fieldrules/src/logger.rs
//! Logger initialisation for the fieldrules CLI.
//!
//! `RUST_LOG` is honoured when no explicit level is given.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises the global logger. Safe to call more than once.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}
