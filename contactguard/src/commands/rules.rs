// contactguard/src/commands/rules.rs
//! The `rules` command: prints the active rule table in application order.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};

use contactguard_core::{Category, ContactSanitizer};

/// One row of the rule table.
#[derive(Debug, Serialize)]
pub struct RuleRow<'a> {
    pub pass: usize,
    pub name: &'a str,
    pub category: Category,
    pub priority: u32,
    pub pattern: &'a str,
    pub validated: bool,
}

/// The active rules, in the order the pipeline applies them.
pub fn rule_rows(sanitizer: &ContactSanitizer) -> Vec<RuleRow<'_>> {
    sanitizer
        .compiled_rules()
        .rules()
        .iter()
        .enumerate()
        .map(|(pass, rule)| RuleRow {
            pass,
            name: &rule.name,
            category: rule.category,
            priority: rule.priority,
            pattern: rule.regex.as_str(),
            validated: rule.programmatic_validation,
        })
        .collect()
}

/// Runs the `rules` command.
pub fn run_rules(sanitizer: &ContactSanitizer, json: bool) -> Result<()> {
    let rows = rule_rows(sanitizer);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        #[derive(Serialize)]
        struct RuleTable<'a> {
            placeholder: &'a str,
            rules: Vec<RuleRow<'a>>,
        }
        let table = RuleTable { placeholder: sanitizer.placeholder(), rules: rows };
        serde_json::to_writer_pretty(&mut out, &table).context("Failed to serialize rule table")?;
        writeln!(out)?;
    } else {
        write_rule_table(&rows, sanitizer.placeholder(), &mut out, io::stdout().is_terminal())
            .context("Failed to write rule table")?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_rule_table<W: Write>(
    rows: &[RuleRow<'_>],
    placeholder: &str,
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "Placeholder: {}", placeholder)?;
    for row in rows {
        let marker = if row.validated { " (validated)" } else { "" };
        if supports_color {
            writeln!(
                writer,
                "{:>2}. {} [{}]{}",
                row.pass + 1,
                row.name.magenta().bold(),
                row.category,
                marker.dimmed()
            )?;
        } else {
            writeln!(writer, "{:>2}. {} [{}]{}", row.pass + 1, row.name, row.category, marker)?;
        }
        writeln!(writer, "    {}", row.pattern)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_application_order() {
        let sanitizer = ContactSanitizer::with_default_rules().unwrap();
        let rows = rule_rows(&sanitizer);
        let categories: Vec<Category> = rows.iter().map(|r| r.category).collect();
        assert_eq!(categories, Category::APPLICATION_ORDER.to_vec());
        assert_eq!(rows[0].name, "phone_number");
        assert!(rows[0].validated);
    }

    #[test]
    fn test_plain_table() {
        let sanitizer = ContactSanitizer::with_default_rules().unwrap();
        let rows = rule_rows(&sanitizer);
        let mut buf = Vec::new();
        write_rule_table(&rows, sanitizer.placeholder(), &mut buf, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Placeholder: [Contact details removed."));
        assert!(text.contains(" 1. phone_number [phone] (validated)"));
        assert!(text.contains(" 3. platform_keyword [keyword]"));
    }
}
