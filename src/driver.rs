//! Sequential execution of a task catalog
//!
//! Runs tasks one at a time in catalog order:
//! - shows a progress indicator while each task is dispatched
//! - records every outcome; a failing task never stops the batch
//! - measures free space before and after the batch

mod printing;
mod result;
mod run;

pub use result::{OutcomeStatus, RunResult, TaskOutcome};
pub use run::{Driver, Pacing};
