//! Run result feature.

use serde::Serialize;

/// How a single task ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Succeeded,
    /// Carries the rendered error
    Failed(String),
}

/// Outcome of one task, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub description: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl TaskOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Result of running a catalog
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    /// Free space before the first task, if it could be measured
    pub start_free_mb: Option<u64>,
    /// Free space after the last task, if it could be measured
    pub end_free_mb: Option<u64>,
    pub outcomes: Vec<TaskOutcome>,
    /// The batch stopped early on an operator interrupt
    pub interrupted: bool,
}

impl RunResult {
    /// Space reclaimed by the run; never negative, 0 when unmeasured
    pub fn freed_mb(&self) -> u64 {
        match (self.start_free_mb, self.end_free_mb) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.len() - self.failed_count()
    }
}
