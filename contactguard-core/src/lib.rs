// contactguard-core/src/lib.rs
//! # contactguard Core Library
//!
//! `contactguard-core` strips contact-sharing attempts (phone numbers, email
//! addresses, social handles and platform-switch keywords) out of marketplace
//! messages, replacing each with a fixed placeholder. It keeps buyers and
//! creators from moving a conversation off-platform before an offer is
//! accepted.
//!
//! The sanitizer is a total, pure function of its input: no I/O, no hidden
//! state, and no error channel. Only building a rule set can fail.
//!
//! ## Modules
//!
//! * `category`: The four detection categories and their application order.
//! * `config`: `ContactRule`s and `SanitizerConfig`, the embedded default table, user rule files.
//! * `sanitizers`: Compilation of a config into the ordered rule pipeline.
//! * `validators`: Post-match checks for phone and handle candidates.
//! * `normalize`: Invisible-character folding with index mapping.
//! * `engine`: `ContactSanitizer`, the replace-all pipeline.
//! * `redaction_match`: Match and summary types, PII-safe logging helpers.
//! * `headless`: Process-wide default sanitizer and one-shot functions.
//! * `errors`: `ContactGuardError`.
//!
//! ## Usage Example
//!
//! ```rust
//! let out = contactguard_core::sanitize("Contact me at test@example.com for details.");
//! assert_eq!(
//!     out,
//!     "Contact me at [Contact details removed. Continue discussion after acceptance.] for details."
//! );
//!
//! assert_eq!(contactguard_core::sanitize_message(None), None);
//! ```
//!
//! ## Application order
//!
//! PHONE, then EMAIL, then KEYWORD, then SOCIAL_HANDLE. Each pass runs on
//! the previous pass's output, so the first category to claim a span wins.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod category;
pub mod config;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod normalize;
pub mod redaction_match;
pub mod sanitizers;
pub mod validators;

pub use category::Category;

pub use config::{
    config_candidate_paths,
    find_user_config,
    merge_rules,
    ContactRule,
    SanitizerConfig,
    DEFAULT_PLACEHOLDER,
    MAX_PATTERN_LENGTH,
};

pub use errors::ContactGuardError;

pub use engine::ContactSanitizer;

pub use redaction_match::{ContactMatch, RedactionSummaryItem, canonical_sample_hash};

pub use headless::{default_pattern_set, default_sanitizer, sanitize, sanitize_message};

pub use sanitizers::compiler::{
    build_keyword_pattern,
    compile_rules,
    ensure_placeholder_is_inert,
    get_or_compile_rules,
    CompiledRule,
    CompiledRules,
};
