//! Command feature handlers.
//!
//! Each module owns one command feature.

pub mod cleanup_command;
pub mod config_command;
