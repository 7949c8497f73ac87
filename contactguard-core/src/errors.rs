//! errors.rs - Custom error types for the contactguard-core library.
//!
//! Only configuration and rule compilation can fail. Sanitizing a message
//! never returns an error.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `contactguard-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ContactGuardError {
    #[error("Failed to compile contact rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule '{0}' has no pattern and is not a keyword rule")]
    MissingPattern(String),

    #[error("Keyword rule '{0}' has no pattern and the keyword vocabulary is empty")]
    EmptyKeywordVocabulary(String),

    #[error("Placeholder must not be empty")]
    EmptyPlaceholder,

    #[error("Placeholder '{placeholder}' is matched by rule '{rule}'; sanitized output would not be stable")]
    PlaceholderNotInert { rule: String, placeholder: String },

    #[error("Compiled rule cache is unavailable: {0}")]
    CacheUnavailable(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
