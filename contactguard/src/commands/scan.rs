// contactguard/src/commands/scan.rs
//! The `scan` command: reports what `sanitize` would remove without
//! rewriting anything.
//!
//! Matched text is never printed. Findings are identified by rule, position
//! and a canonical hash of the removed span.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use contactguard_core::redaction_match::summarize_matches;
use contactguard_core::{Category, ContactMatch, ContactSanitizer, RedactionSummaryItem};

use crate::commands::{error_msg, read_input};
use crate::ui::redaction_summary;

/// Options for a `scan` run.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub input_file: Option<PathBuf>,
    pub json: bool,
    pub fail_over_threshold: Option<usize>,
}

/// One finding as exposed in JSON output.
#[derive(Debug, Serialize)]
pub struct Finding<'a> {
    pub rule_name: &'a str,
    pub category: Category,
    pub round: usize,
    pub pass: usize,
    pub start: usize,
    pub end: usize,
    pub sample_hash: Option<&'a str>,
}

impl<'a> From<&'a ContactMatch> for Finding<'a> {
    fn from(m: &'a ContactMatch) -> Self {
        Finding {
            rule_name: &m.rule_name,
            category: m.category,
            round: m.round,
            pass: m.pass,
            start: m.start,
            end: m.end,
            sample_hash: m.sample_hash.as_deref(),
        }
    }
}

/// The JSON document printed by `scan --json`.
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub total_findings: usize,
    pub summary: Vec<RedactionSummaryItem>,
    pub findings: Vec<Finding<'a>>,
}

impl<'a> ScanReport<'a> {
    pub fn from_matches(matches: &'a [ContactMatch]) -> Self {
        ScanReport {
            total_findings: matches.len(),
            summary: summarize_matches(matches),
            findings: matches.iter().map(Finding::from).collect(),
        }
    }
}

/// Runs the `scan` command. Returns `true` when the finding count is over
/// `fail_over_threshold`.
pub fn run_scan(sanitizer: &ContactSanitizer, opts: &ScanOptions) -> Result<bool> {
    info!("Starting scan operation.");

    let input = read_input(opts.input_file.as_deref())?;
    let matches = sanitizer.scan(&input);
    let report = ScanReport::from_matches(&matches);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if opts.json {
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to serialize scan report")?;
        writeln!(out).context("Failed to write scan report")?;
    } else {
        let stdout_supports_color = io::stdout().is_terminal();
        redaction_summary::print_summary(&report.summary, &mut out, stdout_supports_color)
            .context("Failed to write scan summary")?;
    }
    out.flush().context("Failed to flush stdout")?;

    let exceeded = threshold_exceeded(report.total_findings, opts.fail_over_threshold);
    if exceeded {
        error_msg(format!(
            "Found {} contact detail(s), over the threshold of {}.",
            report.total_findings,
            opts.fail_over_threshold.unwrap_or_default()
        ));
    }

    info!("Scan operation completed with {} finding(s).", report.total_findings);
    Ok(exceeded)
}

fn threshold_exceeded(total: usize, threshold: Option<usize>) -> bool {
    threshold.is_some_and(|limit| total > limit)
}
