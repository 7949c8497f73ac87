// contactguard/src/main.rs
//! contactguard entry point.
//!
//! Parses the command line, sets up logging, builds the sanitizer from the
//! layered rule configuration and dispatches to the chosen subcommand.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use contactguard::cli::{Cli, Commands};
use contactguard::commands::{self, rules, sanitize, scan, RuleSelection};
use contactguard::logger;

fn main() -> ExitCode {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            commands::error_msg(format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}

fn run(args: Cli) -> Result<ExitCode> {
    let selection = RuleSelection {
        config_path: args.config,
        use_user_config: !args.no_user_config,
        enable: args.enable,
        disable: args.disable,
    };
    let sanitizer = commands::build_sanitizer(&selection)?;

    match args.command {
        Commands::Sanitize(cmd) => {
            let opts = sanitize::SanitizeOptions {
                input_file: cmd.input_file,
                output_path: cmd.output,
                line_buffered: cmd.line_buffered,
                summary: cmd.summary,
                quiet: args.quiet,
            };
            sanitize::run_sanitize(&sanitizer, &opts)?;
        }
        Commands::Scan(cmd) => {
            let opts = scan::ScanOptions {
                input_file: cmd.input_file,
                json: cmd.json,
                fail_over_threshold: cmd.fail_over_threshold,
            };
            if scan::run_scan(&sanitizer, &opts)? {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Rules(cmd) => rules::run_rules(&sanitizer, cmd.json)?,
    }

    Ok(ExitCode::SUCCESS)
}
