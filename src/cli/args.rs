//! CLI argument definitions using clap
//!
//! Commands:
//! - fieldrule check --schema <path> --document <path> [--record <name>] [--config <path>]
//! - fieldrule parse-tag <tag>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fieldrule - validate records against field constraint annotations
#[derive(Parser, Debug)]
#[command(name = "fieldrule")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON document against a record schema
    Check {
        /// Schema file, or a directory of schema files
        #[arg(long)]
        schema: PathBuf,

        /// JSON document to validate
        #[arg(long)]
        document: PathBuf,

        /// Record to validate against when --schema is a directory
        #[arg(long)]
        record: Option<String>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the constraints parsed from an annotation
    ParseTag {
        /// Annotation text, e.g. "string,min:6,max:20"
        tag: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "fieldrule",
            "check",
            "--schema",
            "person.json",
            "--document",
            "doc.json",
        ])
        .unwrap();

        match cli.command {
            Command::Check {
                schema,
                record,
                config,
                ..
            } => {
                assert_eq!(schema, PathBuf::from("person.json"));
                assert!(record.is_none());
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_tag_command() {
        let cli = Cli::try_parse_from(["fieldrule", "parse-tag", "int,min:1"]).unwrap();
        assert!(matches!(cli.command, Command::ParseTag { tag } if tag == "int,min:1"));
    }

    #[test]
    fn test_check_requires_document() {
        assert!(Cli::try_parse_from(["fieldrule", "check", "--schema", "s.json"]).is_err());
    }
}
