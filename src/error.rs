//! Error types for the cleanup engine.
//!
//! Per-task failures (`CommandError`, `PurgeError`) are recorded by the
//! execution driver and never abort a batch. `ConfigurationError` is raised
//! before a batch starts and aborts the invocation.

use crate::platform::Platform;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failure of an external command task
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("command is empty")]
    Empty,

    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("command '{command}' failed: {status}\nOutput: {output}")]
    Failed {
        command: String,
        status: ExitStatus,
        output: String,
    },
}

/// Failure of a native filesystem task
#[derive(Error, Debug)]
pub enum PurgeError {
    #[error("cleanup failed: cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cleanup incomplete: {failed} entries could not be removed, first was {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        failed: usize,
        #[source]
        source: io::Error,
    },
}

/// Error raised while preparing an invocation; the batch never starts
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("user mode requires a profile name")]
    MissingProfile,

    #[error("no user profiles found under {}", .0.display())]
    NoProfiles(PathBuf),

    #[error("cannot read profiles folder {}: {source}", root.display())]
    ProfilesUnreadable {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid profile name provided: '{name}'")]
    UnknownProfile { name: String },

    #[error("task description must not be empty")]
    EmptyDescription,

    #[error("task '{0}' has an empty command")]
    EmptyCommand(String),

    #[error("no cleanup tasks left to run")]
    EmptyCatalog,

    #[error("retention window of {days} days is out of range")]
    RetentionOutOfRange { days: u64 },

    #[error("cannot run the {requested} catalog on {current}; add --dry-run to preview it")]
    ForeignPlatform {
        requested: Platform,
        current: Platform,
    },
}

/// Error produced by dispatching a single task
#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Purge(#[from] PurgeError),
}

impl ConfigurationError {
    pub fn unknown_profile<S: Into<String>>(name: S) -> Self {
        ConfigurationError::UnknownProfile { name: name.into() }
    }
}
