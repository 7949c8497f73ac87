// contactguard/src/logger.rs
//! Logger setup for the contactguard CLI.
//!
//! Logs go to stderr so they never mix with sanitized output on stdout.
//! License: MIT OR APACHE 2.0

use log::LevelFilter;

/// Initializes `env_logger`.
///
/// An explicit `level` overrides `RUST_LOG`; with `None` the filter comes from
/// `RUST_LOG`, defaulting to `warn`. Calling it twice is a no-op.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(level) = level {
        builder.filter_level(level);
    }

    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init()
        .ok();
}

/// Maps the `--quiet` / `--debug` flags to an explicit level.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
