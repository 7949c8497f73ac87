//! Terminal output helpers for the contactguard CLI.

pub mod output_format;
pub mod redaction_summary;
