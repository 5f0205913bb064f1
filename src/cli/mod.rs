//! CLI module for dynaform
//!
//! Provides command-line interface for:
//! - init: Create data directory, store and config
//! - serve: Boot and run the HTTP server
//! - validate: Check a values file against the active form
//! - export: Write submissions as CSV

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    boot, export, init, load_schema, resolve_http, run, run_command, serve, validate,
    Config, DEFAULT_CONFIG_PATH,
};
pub use errors::{CliError, CliErrorCode, CliResult};
