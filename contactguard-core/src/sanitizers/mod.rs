//! Rule compilation for the contact sanitizer.
//!
//! This module turns a declarative `SanitizerConfig` into the ordered,
//! immutable pipeline of compiled regular expressions that the engine runs.
//! It works closely with `config` (rule definitions) and `validators`
//! (post-match checks for phone and handle candidates).

pub mod compiler;
