// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every flag is optional: cron invokes `jobguard` with no arguments.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `jobguard`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobguard",
    version,
    about = "Run a scheduled job, capture its output and mail it on failure.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Falls back to `JOBGUARD_CONFIG`, then `Jobguard.toml` in the current
    /// working directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBGUARD_LOG` or `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate the config, print the plan, run nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
