//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Schemavalidator CLI - validate documents against a local schema registry
///
/// Loads every schema below a registry root, resolves `$ref`s between them by
/// identifier and reports the most relevant failure when a document does not
/// match.
#[derive(Parser, Debug)]
#[command(
    name = "schemavalidator",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (-v shows the ranked failure table)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHEMAVALIDATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a document against a registered schema
    Validate(ValidateArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Identifier of the schema to validate against (e.g. person.json)
    #[arg(value_name = "SCHEMA_ID")]
    pub schema_id: String,

    /// Document to validate (JSON or YAML); read from stdin when omitted
    #[arg(short, long, value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// Registry root directory (defaults to the configured root, then the current directory)
    #[arg(short, long, value_name = "DIR", alias = "base_path")]
    pub base_path: Option<PathBuf>,

    /// URI of a strictness meta-schema every registered schema must satisfy
    #[arg(short, long, value_name = "URI")]
    pub strictness_schema: Option<String>,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
