//! compiler.rs - Compiles and caches the contact rule pipeline.
//!
//! Converts a `SanitizerConfig` into `CompiledRules`: one compiled regex per
//! enabled rule, sorted into application order. Compilation also enforces
//! placeholder inertness, so a table whose placeholder would itself be
//! matched can never be built. A global cache avoids recompiling the same
//! configuration.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::{Arc, RwLock};

use crate::category::Category;
use crate::config::{ContactRule, SanitizerConfig, MAX_PATTERN_LENGTH};
use crate::errors::ContactGuardError;
use crate::redaction_match::log_rejected_candidate_debug;
use crate::validators;

/// A single compiled detection rule.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    /// The unique name of the rule.
    pub name: String,
    pub category: Category,
    pub priority: u32,
    /// The compiled regular expression producing candidates.
    pub regex: Regex,
    /// If true, candidates must also pass the category's validator.
    pub programmatic_validation: bool,
}

impl CompiledRule {
    /// Returns the non-overlapping spans this rule accepts in `haystack`, left to right.
    ///
    /// A candidate that fails validation is retried with shorter ends at
    /// token boundaries (`555-123-4567 12345678` still yields the phone
    /// number). If no prefix passes, the search resumes one character after
    /// the candidate's start, so a valid match hidden behind a rejected
    /// prefix (`12345 5551234567`) is still found.
    pub fn find_spans(&self, haystack: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while pos <= haystack.len() {
            let Some(m) = self.regex.find_at(haystack, pos) else { break; };

            if m.is_empty() {
                pos = next_char_boundary(haystack, m.end());
                continue;
            }

            if !self.programmatic_validation {
                spans.push(m.range());
                pos = m.end();
                continue;
            }

            match self.longest_valid_span(haystack, m.start(), m.end()) {
                Some(span) => {
                    pos = span.end;
                    spans.push(span);
                }
                None => {
                    log_rejected_candidate_debug(module_path!(), &self.name, m.as_str());
                    pos = next_char_boundary(haystack, m.start());
                }
            }
        }

        spans
    }

    fn longest_valid_span(&self, haystack: &str, start: usize, end: usize) -> Option<Range<usize>> {
        if validators::validate_candidate(self.category, haystack, start, end) {
            return Some(start..end);
        }

        // Ends where a word character is followed by a non-word character.
        let mut ends: Vec<usize> = Vec::new();
        let mut prev_is_word = false;
        for (idx, c) in haystack[start..end].char_indices() {
            let is_word = validators::is_word_char(c);
            if prev_is_word && !is_word {
                ends.push(start + idx);
            }
            prev_is_word = is_word;
        }

        ends.into_iter().rev().find_map(|e| {
            let shape_holds = self
                .regex
                .find_at(&haystack[..e], start)
                .is_some_and(|m| m.start() == start && m.end() == e);
            (shape_holds && validators::validate_candidate(self.category, haystack, start, e)).then(|| start..e)
        })
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        !self.find_spans(haystack).is_empty()
    }
}

fn next_char_boundary(s: &str, idx: usize) -> usize {
    match s.get(idx..).and_then(|rest| rest.chars().next()) {
        Some(c) => idx + c.len_utf8(),
        None => s.len() + 1,
    }
}

/// The ordered pipeline of compiled rules plus the placeholder they substitute.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    rules: Vec<CompiledRule>,
    placeholder: String,
}

impl CompiledRules {
    /// Rules in application order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn for_category(&self, category: Category) -> impl Iterator<Item = &CompiledRule> + '_ {
        self.rules.iter().filter(move |r| r.category == category)
    }

    pub fn get(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

lazy_static! {
    /// A thread-safe, global cache for compiled rules.
    /// The key is a hash of the `SanitizerConfig`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

fn hash_config(config: &SanitizerConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

/// Builds a whole-word, whitespace-tolerant alternation from a keyword vocabulary.
///
/// Longer phrases come first so `dm me` wins over a shorter overlapping entry.
/// Returns `None` when the vocabulary has no usable entries.
pub fn build_keyword_pattern(keywords: &[String]) -> Option<String> {
    let mut alternatives: Vec<String> = keywords
        .iter()
        .map(|k| {
            k.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .filter(|alt| !alt.is_empty())
        .collect();

    if alternatives.is_empty() {
        return None;
    }

    alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    alternatives.dedup();
    Some(format!(r"\b(?:{})\b", alternatives.join("|")))
}

fn rule_pattern(rule: &ContactRule, keywords: &[String]) -> Result<String, ContactGuardError> {
    match (&rule.pattern, rule.category) {
        (Some(pattern), _) => {
            if pattern.len() > MAX_PATTERN_LENGTH {
                return Err(ContactGuardError::PatternLengthExceeded(
                    rule.name.clone(),
                    pattern.len(),
                    MAX_PATTERN_LENGTH,
                ));
            }
            Ok(pattern.clone())
        }
        (None, Category::Keyword) => build_keyword_pattern(keywords)
            .ok_or_else(|| ContactGuardError::EmptyKeywordVocabulary(rule.name.clone())),
        (None, _) => Err(ContactGuardError::MissingPattern(rule.name.clone())),
    }
}

/// Compiles every enabled rule of `config` into application order and checks
/// the placeholder invariant.
pub fn compile_rules(config: &SanitizerConfig) -> Result<CompiledRules, ContactGuardError> {
    debug!("Starting compilation of {} contact rules.", config.rules.len());

    if config.placeholder.trim().is_empty() {
        return Err(ContactGuardError::EmptyPlaceholder);
    }

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in &config.rules {
        if !rule.is_enabled() {
            debug!("Skipping disabled rule '{}'.", rule.name);
            continue;
        }

        let pattern = match rule_pattern(rule, &config.keywords) {
            Ok(p) => p,
            Err(e) => {
                compilation_errors.push(e);
                continue;
            }
        };

        debug!("Attempting to compile rule '{}' ({}) with pattern '{:?}'", rule.name, rule.category, pattern);

        let regex_result = RegexBuilder::new(&pattern)
            .case_insensitive(rule.case_insensitive)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "contactguard_core::sanitizer",
                    "Rule '{}' compiled successfully.",
                    rule.name
                );
                compiled_rules.push(CompiledRule {
                    name: rule.name.clone(),
                    category: rule.category,
                    priority: rule.priority,
                    regex,
                    programmatic_validation: rule.programmatic_validation,
                });
            }
            Err(e) => compilation_errors.push(ContactGuardError::RuleCompilationError(rule.name.clone(), e)),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(ContactGuardError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    if compiled_rules.is_empty() {
        warn!("No contact rules are enabled; messages will pass through unchanged.");
    }

    compiled_rules.sort_by(|a, b| {
        a.category
            .order()
            .cmp(&b.category.order())
            .then(a.priority.cmp(&b.priority))
            .then_with(|| a.name.cmp(&b.name))
    });

    let compiled = CompiledRules {
        rules: compiled_rules,
        placeholder: config.placeholder.clone(),
    };
    ensure_placeholder_is_inert(&compiled)?;

    debug!("Finished compiling rules. Total compiled: {}.", compiled.len());
    Ok(compiled)
}

/// Placeholder inertness: no compiled rule may accept any span of the placeholder.
///
/// If one did, sanitizing already-sanitized text would replace the
/// placeholder again and `sanitize(sanitize(x)) == sanitize(x)` would fail.
pub fn ensure_placeholder_is_inert(compiled: &CompiledRules) -> Result<(), ContactGuardError> {
    for rule in compiled.rules() {
        if rule.is_match(compiled.placeholder()) {
            return Err(ContactGuardError::PlaceholderNotInert {
                rule: rule.name.clone(),
                placeholder: compiled.placeholder().to_string(),
            });
        }
    }
    Ok(())
}

/// Gets a `CompiledRules` instance from the cache or compiles it if not found.
pub fn get_or_compile_rules(config: &SanitizerConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE
            .read()
            .map_err(|e| ContactGuardError::CacheUnavailable(e.to_string()))?;
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", cache_key);
            return Ok(Arc::clone(rules));
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled_arc = Arc::new(compile_rules(config)?);

    COMPILED_RULES_CACHE
        .write()
        .map_err(|e| ContactGuardError::CacheUnavailable(e.to_string()))?
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", cache_key);
    Ok(compiled_arc)
}
