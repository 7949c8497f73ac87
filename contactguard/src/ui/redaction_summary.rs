//! Per-rule summary of removed contact details.

use contactguard_core::RedactionSummaryItem;
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Prints one line per rule, in pipeline order. Matched text is never shown.
pub fn print_summary<W: Write>(
    summary: &[RedactionSummaryItem],
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    let total: usize = summary.iter().map(|s| s.occurrences).sum();

    if total == 0 {
        return writeln!(writer, "No contact details found.");
    }

    let header = "Contact details removed:";
    if supports_color {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    for item in summary {
        if supports_color {
            writeln!(
                writer,
                "  {} ({}): {}",
                item.rule_name.magenta(),
                item.category,
                item.occurrences.yellow()
            )?;
        } else {
            writeln!(writer, "  {} ({}): {}", item.rule_name, item.category, item.occurrences)?;
        }
    }

    writeln!(writer, "  total: {}", total)
}

/// Folds `more` into `into`, keeping first-seen rule order.
pub fn merge_summaries(into: &mut Vec<RedactionSummaryItem>, more: Vec<RedactionSummaryItem>) {
    for item in more {
        match into.iter_mut().find(|s| s.rule_name == item.rule_name) {
            Some(existing) => {
                existing.occurrences += item.occurrences;
                existing.sample_hashes.extend(item.sample_hashes);
            }
            None => into.push(item),
        }
    }
}
