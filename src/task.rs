//! Cleanup task representation.

use crate::error::{ConfigurationError, TaskError};
use crate::purge;
use crate::runner;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::path::PathBuf;

/// Operation run in-process by the engine
pub type NativeOp = Box<dyn Fn() -> Result<(), TaskError> + Send + Sync>;

/// What a task does when dispatched
pub enum TaskKind {
    /// Run an external program; `argv[0]` is the program and is always present
    ExternalCommand { argv: Vec<String> },
    /// Call `op` directly; `path` is only shown in previews
    NativeOperation { op: NativeOp, path: Option<PathBuf> },
}

/// One unit of cleanup work
pub struct Task {
    description: String,
    kind: TaskKind,
}

impl Task {
    /// Task running an external command
    pub fn command<I, S>(description: &str, argv: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let description = checked_description(description)?;
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.first().map(|p| p.trim().is_empty()).unwrap_or(true) {
            return Err(ConfigurationError::EmptyCommand(description));
        }
        Ok(Self {
            description,
            kind: TaskKind::ExternalCommand { argv },
        })
    }

    /// Task running an arbitrary in-process operation
    pub fn native<F>(description: &str, path: Option<PathBuf>, op: F) -> Result<Self, ConfigurationError>
    where
        F: Fn() -> Result<(), TaskError> + Send + Sync + 'static,
    {
        Ok(Self {
            description: checked_description(description)?,
            kind: TaskKind::NativeOperation {
                op: Box::new(op),
                path,
            },
        })
    }

    /// Task emptying `folder` while keeping the folder itself
    pub fn purge_folder(description: &str, folder: PathBuf) -> Result<Self, ConfigurationError> {
        let target = folder.clone();
        Self::native(description, Some(folder), move || {
            purge::purge_children(&target)?;
            Ok(())
        })
    }

    /// Task deleting files under `folder` older than `days` days.
    ///
    /// A window too large to subtract from the current time is rejected.
    pub fn purge_older_than(description: &str, folder: PathBuf, days: u64) -> Result<Self, ConfigurationError> {
        let window = retention_window(days)?;
        let target = folder.clone();
        Self::native(description, Some(folder), move || {
            // Only reachable if the clock moved far enough; nothing is older then
            let cutoff = Utc::now()
                .checked_sub_signed(window)
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            purge::purge_files_older_than(&target, cutoff)?;
            Ok(())
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Resolved detail for previews: the folder path or the full command line
    pub fn detail(&self) -> String {
        match &self.kind {
            TaskKind::ExternalCommand { argv } => argv.join(" "),
            TaskKind::NativeOperation { path, .. } => path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Run the task to completion on the calling thread
    pub fn dispatch(&self) -> Result<(), TaskError> {
        match &self.kind {
            TaskKind::ExternalCommand { argv } => {
                runner::run_command(argv)?;
                Ok(())
            }
            TaskKind::NativeOperation { op, .. } => op(),
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            TaskKind::ExternalCommand { .. } => "command",
            TaskKind::NativeOperation { .. } => "native",
        };
        f.debug_struct("Task")
            .field("description", &self.description)
            .field("kind", &kind)
            .field("detail", &self.detail())
            .finish()
    }
}

fn retention_window(days: u64) -> Result<TimeDelta, ConfigurationError> {
    i64::try_from(days)
        .ok()
        .and_then(TimeDelta::try_days)
        .filter(|window| Utc::now().checked_sub_signed(*window).is_some())
        .ok_or(ConfigurationError::RetentionOutOfRange { days })
}

fn checked_description(description: &str) -> Result<String, ConfigurationError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ConfigurationError::EmptyDescription);
    }
    Ok(description.to_string())
}
