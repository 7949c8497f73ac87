// contactguard-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use contactguard_core::config::{self, ContactRule, SanitizerConfig, DEFAULT_PLACEHOLDER};
use contactguard_core::{Category, ContactGuardError, ContactSanitizer};

fn write_yaml(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

fn rule(name: &str, category: Category, pattern: &str) -> ContactRule {
    ContactRule {
        name: name.to_string(),
        category,
        pattern: Some(pattern.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_load_default_rules() {
    let config = SanitizerConfig::load_default_rules().unwrap();
    assert_eq!(config.rules.len(), 4);
    let phone = config.rules.iter().find(|r| r.name == "phone_number").unwrap();
    assert!(phone.programmatic_validation);
    let keyword = config.rules.iter().find(|r| r.category == Category::Keyword).unwrap();
    assert!(keyword.pattern.is_none());
    assert!(keyword.case_insensitive);
    for expected in ["whatsapp", "telegram", "signal", "skype", "discord", "call me", "text me", "dm me", "inbox me"] {
        assert!(config.keywords.iter().any(|k| k == expected), "missing keyword {}", expected);
    }
}

#[test]
fn test_load_from_file() -> Result<()> {
    let file = write_yaml(
        r#"
keywords:
  - viber
rules:
  - name: wa_link
    category: keyword
    pattern: 'wa\.me/\S+'
    priority: 2
    description: "WhatsApp click-to-chat links"
"#,
    )?;
    let config = SanitizerConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].name, "wa_link");
    assert_eq!(config.rules[0].category, Category::Keyword);
    assert_eq!(config.rules[0].priority, 2);
    assert!(!config.rules[0].programmatic_validation);
    assert_eq!(config.keywords, vec!["viber".to_string()]);
    // Omitted placeholder falls back to the default.
    assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_regex() -> Result<()> {
    let file = write_yaml(
        r#"
rules:
  - name: broken
    category: email
    pattern: '(unclosed'
"#,
    )?;
    let err = SanitizerConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Rule validation failed"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_unknown_category() -> Result<()> {
    let file = write_yaml(
        r#"
rules:
  - name: fax
    category: fax_number
    pattern: '\d+'
"#,
    )?;
    assert!(SanitizerConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_merge_rules_no_user_config() {
    let default_config = SanitizerConfig::load_default_rules().unwrap();
    let merged = config::merge_rules(default_config.clone(), None);
    assert_eq!(merged, default_config);
}

#[test]
fn test_merge_rules_override_keeps_default_order() {
    let default_config = SanitizerConfig {
        rules: vec![
            rule("phone", Category::Phone, r"\d{10}"),
            rule("email", Category::Email, r"\S+@\S+\.\w+"),
        ],
        ..Default::default()
    };
    let user_config = SanitizerConfig {
        placeholder: String::new(),
        keywords: vec![],
        rules: vec![
            rule("extra", Category::SocialHandle, "@[a-z]{3,}"),
            ContactRule { priority: 3, ..rule("phone", Category::Phone, r"\d{11}") },
        ],
    };
    let merged = config::merge_rules(default_config, Some(user_config));
    let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["phone", "email", "extra"]);
    assert_eq!(merged.rules[0].pattern.as_deref(), Some(r"\d{11}"));
    assert_eq!(merged.rules[0].priority, 3);
    // Empty user placeholder does not override.
    assert_eq!(merged.placeholder, DEFAULT_PLACEHOLDER);
}

#[test]
fn test_merge_rules_appends_keywords_without_duplicates() {
    let default_config = SanitizerConfig::load_default_rules().unwrap();
    let before = default_config.keywords.len();
    let user_config = SanitizerConfig {
        keywords: vec!["WhatsApp".to_string(), " viber ".to_string(), "wechat".to_string(), "viber".to_string()],
        ..Default::default()
    };
    let merged = config::merge_rules(default_config, Some(user_config));
    assert_eq!(merged.keywords.len(), before + 2);
    assert!(merged.keywords.iter().any(|k| k == "viber"));
    assert!(merged.keywords.iter().any(|k| k == "wechat"));
}

#[test]
fn test_merged_keywords_are_enforced() -> Result<()> {
    let file = write_yaml(
        r#"
keywords:
  - viber
  - line app
"#,
    )?;
    let user = SanitizerConfig::load_from_file(file.path())?;
    let merged = config::merge_rules(SanitizerConfig::load_default_rules()?, Some(user));
    let sanitizer = ContactSanitizer::new(merged)?;
    let out = sanitizer.sanitize("find me on Viber or the LINE  app");
    assert_eq!(out.matches(DEFAULT_PLACEHOLDER).count(), 2);
    Ok(())
}

#[test]
fn test_user_placeholder_override_is_checked_for_inertness() -> Result<()> {
    let file = write_yaml(
        r#"
placeholder: "[removed - call me after acceptance]"
"#,
    )?;
    let user = SanitizerConfig::load_from_file(file.path())?;
    let merged = config::merge_rules(SanitizerConfig::load_default_rules()?, Some(user));
    let err = ContactSanitizer::new(merged).unwrap_err();
    let root = err.root_cause().to_string();
    assert!(root.contains("platform_keyword"), "unexpected error: {}", root);
    assert!(err.chain().any(|e| matches!(
        e.downcast_ref::<ContactGuardError>(),
        Some(ContactGuardError::PlaceholderNotInert { .. })
    )));
    Ok(())
}

#[test]
fn test_set_active_rules_disables_category() {
    let mut config = SanitizerConfig::load_default_rules().unwrap();
    config.set_active_rules(&[], &["social_handle".to_string(), "does_not_exist".to_string()]);
    let sanitizer = ContactSanitizer::new(config).unwrap();
    assert_eq!(sanitizer.sanitize("Check my IG @instastar"), "Check my IG @instastar");
}

#[test]
fn test_config_candidate_paths_include_local_file() {
    let paths = config::config_candidate_paths();
    assert!(paths.iter().any(|p| p.ends_with("contactguard.yaml")));
}
