// fieldrules/src/main.rs
//! fieldrules entry point.
//!
//! Exit status is 0 on success, 1 when any value fails validation and 2 on
//! any other error.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::{debug, LevelFilter};

use fieldrules::cli::{Cli, Commands};
use fieldrules::commands::fields;
use fieldrules::logger;
use fieldrules::ui::output_format;
use fieldrules_core::Registry;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match run(cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            let mut stderr = io::stderr();
            let is_tty = stderr.is_terminal();
            let _ = output_format::print_error_message(
                &mut stderr,
                &format!("{e:#}"),
                is_tty,
            );
            ExitCode::from(2)
        }
    }
}

/// Runs the selected command and returns the number of failed validations.
fn run(cli: Cli) -> Result<usize> {
    let owned;
    let registry = match &cli.rules {
        Some(path) => {
            debug!("Merging field rules from {}.", path.display());
            owned = Registry::with_overrides(path)
                .with_context(|| format!("Failed to load field rules from {}", path.display()))?;
            if !cli.quiet {
                let mut stderr = io::stderr();
                let is_tty = stderr.is_terminal();
                output_format::print_info_message(
                    &mut stderr,
                    &format!("Using {} field rules with overrides from {}", owned.len(), path.display()),
                    is_tty,
                )?;
            }
            &owned
        }
        None => Registry::global(),
    };

    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut out = stdout.lock();

    let failures = match cli.command {
        Commands::List => {
            fields::run_list(registry, &mut out)?;
            0
        }
        Commands::Show { key, json } => {
            fields::run_show(registry, &key, json, &mut out, enable_colors)?;
            0
        }
        Commands::Sanitise(args) => {
            registry.lookup(&args.key)?;
            let values = fields::collect_values(args.value)?;
            fields::run_sanitise(registry, &args.key, &values, &mut out)?;
            0
        }
        Commands::Validate { args, sanitise } => {
            registry.lookup(&args.key)?;
            let values = fields::collect_values(args.value)?;
            fields::run_validate(registry, &args.key, &values, sanitise, &mut out, enable_colors)?
        }
        Commands::FormatPhone { value } => {
            let values = fields::collect_values(value)?;
            fields::run_format_phone(&values, &mut out)?;
            0
        }
    };

    out.flush()?;
    Ok(failures)
}
