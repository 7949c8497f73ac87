// contactguard/src/cli.rs
//! Command-line interface definition for contactguard: global flags and the
//! `sanitize`, `scan` and `rules` subcommands.
//! License: MIT OR APACHE 2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "contactguard",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip off-platform contact details from message text",
    long_about = "contactguard removes phone numbers, email addresses, social handles and platform-switch keywords (WhatsApp, Telegram, \"DM me\" ...) from marketplace messages, replacing each with a fixed placeholder so that conversations stay on-platform until an offer is accepted.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a rules file merged over the built-in defaults.
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        env = "CONTACTGUARD_CONFIG",
        help = "Path to a custom rules file (YAML) merged over the built-in rules."
    )]
    pub config: Option<PathBuf>,

    /// Ignore rules files found in the standard locations.
    #[arg(long = "no-user-config", global = true, help = "Use only the built-in rules (plus --config, if given).")]
    pub no_user_config: bool,

    /// Explicitly enable these rule names (comma-separated), including opt-in rules.
    #[arg(long, short = 'e', value_delimiter = ',', global = true, help = "Enable these rule names (comma-separated), including opt-in rules.")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', global = true, help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `contactguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replaces contact details in an input file or stdin with the placeholder.
    #[command(about = "Replace contact details in a file or stdin with the placeholder.")]
    Sanitize(SanitizeCommand),

    /// Reports contact details found in the input without rewriting it.
    #[command(about = "Report contact details found in the input without rewriting it.")]
    Scan(ScanCommand),

    /// Lists the active rules in application order.
    #[command(about = "List the active rules in application order.")]
    Rules(RulesCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Process input line by line (useful for streaming data from pipes).
    #[arg(long = "line-buffered", help = "Process input line by line (useful for streaming data from pipes).")]
    pub line_buffered: bool,

    /// Print a per-rule summary to stderr.
    #[arg(long = "summary", short = 's', help = "Print a per-rule removal summary to stderr.")]
    pub summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Print the scan result as JSON to stdout.
    #[arg(long = "json", help = "Print the scan result as JSON to stdout.")]
    pub json: bool,

    /// Exit with a non-zero code if the number of findings exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with code 1 if the number of findings exceeds N.")]
    pub fail_over_threshold: Option<usize>,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    /// Print the rule table as JSON.
    #[arg(long = "json", help = "Print the rule table as JSON.")]
    pub json: bool,
}
