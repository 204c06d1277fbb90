//! Scour library crate
//!
//! Builds ordered cleanup task catalogs per platform and mode and runs them
//! one at a time, reporting each outcome and the disk space freed.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod disk;
pub mod driver;
pub mod error;
pub mod output;
pub mod platform;
pub mod profile;
pub mod progress;
pub mod purge;
pub mod runner;
pub mod task;
pub mod theme;

/// Initialise `log` output on stderr; `RUST_LOG` overrides the `warn` default
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
