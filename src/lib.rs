//! gonzo: layered configuration for the gonzo log analysis TUI
//!
//! Resolves the single effective [`domain::Config`] from command-line flags,
//! `GONZO_*` environment variables, a YAML config file and built-in defaults,
//! in that order of precedence.

pub mod cli;
pub mod config;
pub mod domain;
pub mod utils;
