// File: contactguard-core/src/headless.rs

//! `headless.rs`
//! One-shot entry points over a process-wide sanitizer built from the
//! embedded default rules.
//!
//! The default pipeline is compiled once, on first use, and never mutated.

use once_cell::sync::Lazy;

use crate::engine::ContactSanitizer;
use crate::sanitizers::compiler::CompiledRules;

static DEFAULT_SANITIZER: Lazy<ContactSanitizer> = Lazy::new(|| {
    // The embedded table is a compile-time constant; its successful
    // compilation is covered by the crate's tests.
    ContactSanitizer::with_default_rules().expect("built-in contact rules must compile")
});

/// The process-wide sanitizer over the built-in rules.
pub fn default_sanitizer() -> &'static ContactSanitizer {
    &DEFAULT_SANITIZER
}

/// The built-in pattern table, in application order, for introspection.
pub fn default_pattern_set() -> &'static CompiledRules {
    DEFAULT_SANITIZER.compiled_rules()
}

/// Sanitizes `text` with the built-in rules.
pub fn sanitize(text: &str) -> String {
    DEFAULT_SANITIZER.sanitize(text)
}

/// Nullable form of [`sanitize`]: `None` in, `None` out; `""` in, `""` out.
pub fn sanitize_message(text: Option<&str>) -> Option<String> {
    DEFAULT_SANITIZER.sanitize_message(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_default_pattern_set_has_one_rule_per_category_in_order() {
        let categories: Vec<Category> = default_pattern_set().rules().iter().map(|r| r.category).collect();
        assert_eq!(categories, Category::APPLICATION_ORDER.to_vec());
    }

    #[test]
    fn test_sanitize_message_passthrough() {
        assert_eq!(sanitize_message(None), None);
        assert_eq!(sanitize_message(Some("")).as_deref(), Some(""));
    }
}
