// contactguard/src/lib.rs
//! # contactguard CLI
//!
//! Command-line front end for `contactguard-core`: sanitize or scan message
//! text from files or stdin, and inspect the active rule table.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
