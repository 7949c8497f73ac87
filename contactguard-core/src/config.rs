//! Configuration management for `contactguard-core`.
//!
//! This module defines the declarative pattern table: the rules, the keyword
//! vocabulary and the placeholder. It handles YAML (de)serialization, the
//! embedded default rule set, merging user rule files over it and validating
//! rule integrity.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::category::Category;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// The text substituted for every detected contact-sharing span.
pub const DEFAULT_PLACEHOLDER: &str =
    "[Contact details removed. Continue discussion after acceptance.]";

/// Environment variable pointing at a user rule file.
pub const CONFIG_PATH_ENV: &str = "CONTACTGUARD_CONFIG";

/// A single detection rule: a (category, matcher, priority) triple plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactRule {
    /// Unique identifier for the rule (e.g., "phone_number").
    pub name: String,
    /// Which pass of the pipeline this rule belongs to.
    pub category: Category,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string. A keyword rule may omit it, in which case
    /// the pattern is built from the config's keyword vocabulary.
    pub pattern: Option<String>,
    /// Ordering inside a category. Lower runs first.
    pub priority: u32,
    pub case_insensitive: bool,
    /// If true, every regex candidate must also pass the category's validator.
    pub programmatic_validation: bool,
    /// If true, the rule is disabled unless explicitly enabled.
    pub opt_in: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl Default for ContactRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::default(),
            description: None,
            pattern: None,
            priority: 0,
            case_insensitive: false,
            programmatic_validation: false,
            opt_in: false,
            enabled: None,
            tags: None,
        }
    }
}

impl ContactRule {
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// Represents the top-level configuration structure for contactguard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Replacement text for every matched span.
    pub placeholder: String,
    /// Channel names and circumvention phrases for keyword rules without a pattern.
    pub keywords: Vec<String>,
    pub rules: Vec<ContactRule>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            keywords: Vec::new(),
            rules: Vec::new(),
        }
    }
}

impl SanitizerConfig {
    /// Loads contact rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom contact rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SanitizerConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules and {} keywords from file {}.", config.rules.len(), config.keywords.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in rule set from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default contact rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: SanitizerConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Filters active rules based on enable/disable lists.
    ///
    /// Disabled names are removed. Opt-in rules survive only when named in
    /// `enable_rules`.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain(|rule| {
            let rule_name_str = rule.name.as_str();
            !disable_set.contains(rule_name_str) && (!rule.opt_in || enable_set.contains(rule_name_str))
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Merges a user rule file over the defaults.
///
/// User rules replace default rules of the same name, user keywords are
/// appended (case-insensitive dedupe) and a non-empty user placeholder wins.
pub fn merge_rules(
    default_config: SanitizerConfig,
    user_config: Option<SanitizerConfig>,
) -> SanitizerConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let SanitizerConfig { mut placeholder, mut keywords, rules } = default_config;

    // Keep default ordering stable; user-only rules go after, in file order.
    let mut order: Vec<String> = rules.iter().map(|r| r.name.clone()).collect();
    let mut final_rules_map: HashMap<String, ContactRule> = rules.into_iter()
        .map(|rule| (rule.name.clone(), rule))
        .collect();

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            if !final_rules_map.contains_key(&user_rule.name) {
                order.push(user_rule.name.clone());
            }
            final_rules_map.insert(user_rule.name.clone(), user_rule);
        }

        let mut seen: HashSet<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        for keyword in user_cfg.keywords {
            let trimmed = keyword.trim();
            if !trimmed.is_empty() && seen.insert(trimmed.to_lowercase()) {
                keywords.push(trimmed.to_string());
            }
        }

        if !user_cfg.placeholder.trim().is_empty() && user_cfg.placeholder != placeholder {
            debug!("Overriding placeholder with user value.");
            placeholder = user_cfg.placeholder;
        }
    }

    let final_rules: Vec<ContactRule> = order.into_iter()
        .filter_map(|name| final_rules_map.remove(&name))
        .collect();
    debug!("Final total rules after merge: {}", final_rules.len());

    SanitizerConfig {
        placeholder,
        keywords,
        rules: final_rules,
    }
}

/// Candidate locations for a user rule file, most specific first.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let candidates = vec![
        std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
        dirs::config_dir().map(|p| p.join("contactguard").join("rules.yaml")),
        dirs::home_dir().map(|p| p.join(".contactguard").join("rules.yaml")),
        Some(PathBuf::from("./contactguard.yaml")),
    ];

    candidates.into_iter().flatten().collect()
}

/// Returns the first existing user rule file, if any.
pub fn find_user_config() -> Option<PathBuf> {
    config_candidate_paths().into_iter().find(|p| {
        let exists = p.is_file();
        if !exists {
            debug!("No user rule file at {}", p.display());
        }
        exists
    })
}

/// Validates rule integrity (names, pattern presence, length and compilation).
fn validate_rules(rules: &[ContactRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) => p,
            None if rule.category == Category::Keyword => continue,
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name, pattern.len(), MAX_PATTERN_LENGTH
            ));
            continue;
        }

        if let Err(e) = Regex::new(pattern) {
            errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
