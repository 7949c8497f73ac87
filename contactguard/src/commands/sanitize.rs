// contactguard/src/commands/sanitize.rs
//! The `sanitize` command: rewrites input with every contact detail replaced
//! by the placeholder.
//!
//! Output is written exactly as sanitized, with no added newline, so clean
//! input round-trips byte for byte.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use contactguard_core::{ContactSanitizer, RedactionSummaryItem};

use crate::commands::{info_msg, read_input};
use crate::ui::redaction_summary;

/// Options for a `sanitize` run.
#[derive(Debug, Clone, Default)]
pub struct SanitizeOptions {
    pub input_file: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub line_buffered: bool,
    pub summary: bool,
    pub quiet: bool,
}

/// Runs the `sanitize` command.
pub fn run_sanitize(sanitizer: &ContactSanitizer, opts: &SanitizeOptions) -> Result<()> {
    info!("Starting sanitize operation.");

    let summary = if opts.line_buffered {
        let reader: Box<dyn BufRead> = match &opts.input_file {
            Some(path) => Box::new(io::BufReader::new(
                fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
            )),
            None => Box::new(io::stdin().lock()),
        };
        let mut writer = open_output(opts)?;
        let summary = sanitize_lines(sanitizer, reader, &mut writer)?;
        writer.flush().context("Failed to flush output")?;
        summary
    } else {
        let input = read_input(opts.input_file.as_deref())?;
        let (sanitized, summary) = sanitizer.sanitize_with_report(&input);
        debug!(
            "Content sanitized. Original length: {}, Sanitized length: {}",
            input.len(),
            sanitized.len()
        );
        let mut writer = open_output(opts)?;
        writer
            .write_all(sanitized.as_bytes())
            .context("Failed to write sanitized output")?;
        writer.flush().context("Failed to flush output")?;
        summary
    };

    if let Some(path) = &opts.output_path {
        info_msg(format!("Sanitized output written to {}", path.display()), opts.quiet);
    }

    if opts.summary {
        let stderr_supports_color = io::stderr().is_terminal();
        redaction_summary::print_summary(&summary, &mut io::stderr(), stderr_supports_color)
            .context("Failed to write summary")?;
    }

    info!("Sanitize operation completed.");
    Ok(())
}

/// Sanitizes `reader` one line at a time, flushing after every line.
///
/// Line endings are preserved as read. A contact detail split across two
/// lines is treated as two separate fragments.
pub fn sanitize_lines<R: BufRead, W: Write>(
    sanitizer: &ContactSanitizer,
    mut reader: R,
    writer: &mut W,
) -> Result<Vec<RedactionSummaryItem>> {
    let mut summary = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line).context("Failed to read input line")?;
        if read == 0 {
            break;
        }
        let (sanitized, line_summary) = sanitizer.sanitize_with_report(&line);
        redaction_summary::merge_summaries(&mut summary, line_summary);
        writer
            .write_all(sanitized.as_bytes())
            .context("Failed to write sanitized line")?;
        writer.flush().context("Failed to flush output")?;
    }

    Ok(summary)
}

fn open_output(opts: &SanitizeOptions) -> Result<Box<dyn Write>> {
    match &opts.output_path {
        Some(path) => {
            info!("Writing sanitized content to file: {}", path.display());
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
