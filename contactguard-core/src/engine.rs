// contactguard-core/src/engine.rs
//! The contact sanitizer pipeline.
//!
//! `ContactSanitizer` runs every compiled rule in application order, each as
//! a replace-all pass over the output of the previous pass. Replacing a span
//! can expose a neighbour that a validator rejected earlier in the round, so
//! the passes repeat until a full round changes nothing. The output is
//! therefore a fixed point of the pipeline.
//!
//! Sanitizing is total: it cannot fail and has no error channel. Only
//! constructing a sanitizer (compiling its rules) can fail.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::{debug, warn};
use std::borrow::Cow;
use std::sync::Arc;

use crate::category::Category;
use crate::config::SanitizerConfig;
use crate::normalize::FoldedText;
use crate::redaction_match::{
    ensure_match_hashes, log_contact_match_debug, summarize_matches, ContactMatch, RedactionSummaryItem,
};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRule, CompiledRules};

/// Upper bound on pipeline rounds for a single message.
const MAX_ROUNDS: usize = 16;

/// Strips contact-sharing spans out of message text.
///
/// Cheap to clone; the compiled pipeline is shared.
#[derive(Debug, Clone)]
pub struct ContactSanitizer {
    compiled_rules: Arc<CompiledRules>,
    config: SanitizerConfig,
}

impl ContactSanitizer {
    pub fn new(config: SanitizerConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile contact rules for ContactSanitizer")?;

        Ok(Self { compiled_rules, config })
    }

    /// Builds a sanitizer over the embedded default rule set.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(SanitizerConfig::load_default_rules()?)
    }

    /// Replaces every contact-sharing span in `text` with the placeholder.
    ///
    /// Text with no match comes back byte-identical.
    pub fn sanitize(&self, text: &str) -> String {
        self.run_pipeline(text, None)
    }

    /// Nullable form of [`ContactSanitizer::sanitize`]: `None` stays `None`.
    pub fn sanitize_message(&self, text: Option<&str>) -> Option<String> {
        text.map(|t| self.sanitize(t))
    }

    /// Sanitizes `text` and returns per-rule totals alongside the result.
    pub fn sanitize_with_report(&self, text: &str) -> (String, Vec<RedactionSummaryItem>) {
        let mut matches = Vec::new();
        let sanitized = self.run_pipeline(text, Some(&mut matches));
        (sanitized, summarize_matches(&matches))
    }

    /// Lists every span the pipeline would remove, in pass order.
    pub fn scan(&self, text: &str) -> Vec<ContactMatch> {
        let mut matches = Vec::new();
        self.run_pipeline(text, Some(&mut matches));
        ensure_match_hashes(&mut matches);
        matches
    }

    /// True when sanitizing `text` would change it.
    pub fn contains_contact_details(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let folded = FoldedText::new(text);
        self.compiled_rules.rules().iter().any(|rule| rule.is_match(folded.as_str()))
    }

    pub fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    pub fn rules_for(&self, category: Category) -> Vec<&CompiledRule> {
        self.compiled_rules.for_category(category).collect()
    }

    pub fn placeholder(&self) -> &str {
        self.compiled_rules.placeholder()
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    fn run_pipeline(&self, text: &str, mut collector: Option<&mut Vec<ContactMatch>>) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut current: Cow<'_, str> = Cow::Borrowed(text);
        for round in 0..MAX_ROUNDS {
            let mut changed = false;
            for (pass, rule) in self.compiled_rules.rules().iter().enumerate() {
                let position = (round, pass);
                if let Some(next) = self.apply_rule(position, rule, &current, collector.as_deref_mut()) {
                    current = Cow::Owned(next);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
            if round + 1 == MAX_ROUNDS {
                warn!("Message still changing after {} sanitizer rounds; stopping.", MAX_ROUNDS);
            }
        }

        if let Cow::Owned(ref sanitized) = current {
            debug!(
                "Sanitized message. Original length: {}, sanitized length: {}",
                text.len(),
                sanitized.len()
            );
        }
        current.into_owned()
    }

    /// One replace-all pass. Returns `None` when the rule found nothing.
    fn apply_rule(
        &self,
        (round, pass): (usize, usize),
        rule: &CompiledRule,
        text: &str,
        mut collector: Option<&mut Vec<ContactMatch>>,
    ) -> Option<String> {
        let folded = FoldedText::new(text);
        let spans = rule.find_spans(folded.as_str());
        if spans.is_empty() {
            return None;
        }

        let placeholder = self.compiled_rules.placeholder();
        let mut sanitized = String::with_capacity(text.len() + spans.len() * placeholder.len());
        let mut last_end = 0usize;

        for span in spans {
            let original = folded.map_range(span);
            if original.start < last_end {
                continue;
            }
            let matched = &text[original.clone()];
            log_contact_match_debug(module_path!(), &rule.name, matched);

            sanitized.push_str(&text[last_end..original.start]);
            sanitized.push_str(placeholder);
            last_end = original.end;

            if let Some(matches) = collector.as_deref_mut() {
                matches.push(ContactMatch {
                    rule_name: rule.name.clone(),
                    category: rule.category,
                    original_string: matched.to_string(),
                    start: original.start,
                    end: original.end,
                    round,
                    pass,
                    sample_hash: None,
                });
            }
        }
        sanitized.push_str(&text[last_end..]);

        Some(sanitized)
    }
}
