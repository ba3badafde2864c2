//! CLI module for fieldrule
//!
//! Provides command-line interface for:
//! - check: Validate a JSON document against a record schema
//! - parse-tag: Show how a constraint annotation is parsed

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, parse_tag, run, run_command, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
