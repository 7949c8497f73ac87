// contactguard/src/commands/mod.rs
//! Subcommand implementations and the plumbing they share: building the
//! sanitizer from the layered rule configuration, reading input and printing
//! status messages.
//! License: MIT OR APACHE 2.0

pub mod rules;
pub mod sanitize;
pub mod scan;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use contactguard_core::{find_user_config, merge_rules, ContactSanitizer, SanitizerConfig};

use crate::ui::output_format;

/// Where the rule table comes from and which rules are switched on.
#[derive(Debug, Clone, Default)]
pub struct RuleSelection {
    pub config_path: Option<PathBuf>,
    pub use_user_config: bool,
    pub enable: Vec<String>,
    pub disable: Vec<String>,
}

/// Builds the effective config: built-in rules, then a user rules file, then
/// the enable/disable filters.
///
/// An explicit `config_path` must exist. Without one, the first rules file
/// found in the standard locations is used when `use_user_config` is set.
pub fn load_config(selection: &RuleSelection) -> Result<SanitizerConfig> {
    let defaults = SanitizerConfig::load_default_rules()?;

    let user_path = match &selection.config_path {
        Some(path) => Some(path.clone()),
        None if selection.use_user_config => find_user_config(),
        None => None,
    };

    let user_config = match user_path {
        Some(path) => {
            info!("Using rules file {}", path.display());
            Some(
                SanitizerConfig::load_from_file(&path)
                    .with_context(|| format!("Failed to load rules file {}", path.display()))?,
            )
        }
        None => {
            debug!("No user rules file; using built-in rules only.");
            None
        }
    };

    let mut config = merge_rules(defaults, user_config);
    config.set_active_rules(&selection.enable, &selection.disable);
    Ok(config)
}

/// Loads the config for `selection` and compiles it.
pub fn build_sanitizer(selection: &RuleSelection) -> Result<ContactSanitizer> {
    let config = load_config(selection)?;
    ContactSanitizer::new(config).context("Invalid contact rule configuration")
}

/// Reads all of `input_file`, or stdin when no file is given.
pub fn read_input(input_file: Option<&Path>) -> Result<String> {
    match input_file {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input from {}", path.display()))
        }
        None => {
            info!("Reading input from stdin...");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, quiet: bool) {
    if quiet {
        return;
    }
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}
