// contactguard-core/src/redaction_match.rs
//! Data structures for reporting contact matches, plus logging helpers that
//! keep matched contact details out of debug logs.

use log::debug;
use serde::{Deserialize, Serialize};

use lazy_static::lazy_static;
use sha2::{Digest, Sha256};

use crate::category::Category;

lazy_static! {
    /// Whether matched contact details may appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("CONTACTGUARD_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single span removed from a message.
///
/// `start`/`end` are byte offsets into the text as it was when `pass` ran in
/// `round`, i.e. after every earlier pass had already substituted its
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMatch {
    pub rule_name: String,
    pub category: Category,
    pub original_string: String,
    pub start: usize,
    pub end: usize,
    /// 0-based pipeline round; later rounds only run when an earlier one changed the text.
    #[serde(default)]
    pub round: usize,
    /// 0-based index of the pipeline stage that found this match.
    pub pass: usize,
    #[serde(default)]
    pub sample_hash: Option<String>,
}

/// Per-rule totals for one sanitized message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub category: Category,
    pub occurrences: usize,
    /// Canonical hashes of the removed spans, in match order.
    pub sample_hashes: Vec<String>,
}

/// Builds per-rule summary items from matches, in pipeline order.
pub fn summarize_matches(matches: &[ContactMatch]) -> Vec<RedactionSummaryItem> {
    let mut summary: Vec<RedactionSummaryItem> = Vec::new();
    for m in matches {
        let hash = m
            .sample_hash
            .clone()
            .unwrap_or_else(|| canonical_sample_hash(&m.rule_name, &m.original_string));
        match summary.iter_mut().find(|s| s.rule_name == m.rule_name) {
            Some(item) => {
                item.occurrences += 1;
                item.sample_hashes.push(hash);
            }
            None => summary.push(RedactionSummaryItem {
                rule_name: m.rule_name.clone(),
                category: m.category,
                occurrences: 1,
                sample_hashes: vec![hash],
            }),
        }
    }
    summary
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_contact_match_debug(module_path: &str, rule_name: &str, original_sensitive_content: &str) {
    debug!(
        "{} Removed contact span for rule '{}': '{}'",
        module_path,
        rule_name,
        get_loggable_content(original_sensitive_content)
    );
}

pub fn log_rejected_candidate_debug(module_path: &str, rule_name: &str, candidate: &str) {
    debug!(
        "{} Candidate for rule '{}' failed validation: '{}'",
        module_path,
        rule_name,
        get_loggable_content(candidate)
    );
}

/// Stable, case- and whitespace-insensitive hash of a matched span.
pub fn canonical_sample_hash(rule_id: &str, snippet: &str) -> String {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn ensure_match_hashes(matches: &mut [ContactMatch]) {
    for m in matches.iter_mut() {
        if m.sample_hash.is_none() {
            m.sample_hash = Some(canonical_sample_hash(&m.rule_name, &m.original_string));
        }
    }
}
