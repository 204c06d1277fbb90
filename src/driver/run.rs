//! Catalog run orchestration feature.

use super::printing::{erase_line, write_outcome, write_summary};
use super::result::{OutcomeStatus, RunResult, TaskOutcome};
use crate::catalog::Catalog;
use crate::config::Timing;
use crate::disk::FreeSpace;
use crate::progress::{ProgressIndicator, SilentIndicator};
use crate::task::Task;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Fixed pauses that keep the live output readable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacing {
    /// Before the first task
    pub start_delay: Duration,
    /// After each indicator starts, before dispatch
    pub task_delay: Duration,
}

impl Pacing {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_timing(timing: &Timing) -> Self {
        Self {
            start_delay: timing.start_delay(),
            task_delay: timing.task_delay(),
        }
    }
}

/// Runs catalogs and reports progress to `out`
pub struct Driver<W: Write> {
    out: W,
    verbose: bool,
    indicator: Box<dyn ProgressIndicator>,
    disk: Box<dyn FreeSpace>,
    pacing: Pacing,
    erase_lines: bool,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<W: Write> Driver<W> {
    /// Driver with a silent indicator and no pauses
    pub fn new(out: W, disk: Box<dyn FreeSpace>, verbose: bool) -> Self {
        Self {
            out,
            verbose,
            indicator: Box::new(SilentIndicator),
            disk,
            pacing: Pacing::none(),
            erase_lines: false,
            interrupt: None,
        }
    }

    pub fn with_indicator(mut self, indicator: Box<dyn ProgressIndicator>) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Clear the indicator's line before each outcome line (terminal output)
    pub fn with_line_erase(mut self, erase: bool) -> Self {
        self.erase_lines = erase;
        self
    }

    /// Stop before the next task once `flag` is set
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run every task in catalog order and report the space freed
    pub fn run(&mut self, catalog: &Catalog) -> RunResult {
        if catalog.is_empty() {
            return RunResult::default();
        }

        let start_free_mb = self.measure("before");
        pause(self.pacing.start_delay);

        let mut outcomes = Vec::with_capacity(catalog.len());
        let mut interrupted = false;

        for task in catalog {
            if self.interrupt_requested() {
                log::warn!(
                    "Interrupted; {} of {} tasks were not started",
                    catalog.len() - outcomes.len(),
                    catalog.len()
                );
                interrupted = true;
                break;
            }
            outcomes.push(self.run_task(task));
        }

        let result = RunResult {
            start_free_mb,
            end_free_mb: self.measure("after"),
            outcomes,
            interrupted,
        };

        self.emit(|out| write_summary(out, &result));
        result
    }

    fn run_task(&mut self, task: &Task) -> TaskOutcome {
        let handle = self.indicator.start(task.description());
        pause(self.pacing.task_delay);
        let dispatched = task.dispatch();
        handle.stop();

        if self.erase_lines {
            self.emit(|out| erase_line(out));
        }

        let status = match dispatched {
            Ok(()) => OutcomeStatus::Succeeded,
            Err(e) => {
                log::warn!("Task '{}' failed: {}", task.description(), e);
                OutcomeStatus::Failed(e.to_string())
            }
        };

        let failure = match &status {
            OutcomeStatus::Failed(detail) => Some(detail.as_str()),
            OutcomeStatus::Succeeded => None,
        };
        let verbose = self.verbose;
        self.emit(|out| write_outcome(out, task.description(), failure, verbose));

        TaskOutcome {
            description: task.description().to_string(),
            status,
        }
    }

    fn measure(&self, when: &str) -> Option<u64> {
        let free = self.disk.free_mb();
        match free {
            Some(mb) => log::debug!("Free space {} run: {} MB", when, mb),
            None => log::warn!("Could not measure free disk space {} run", when),
        }
        free
    }

    fn interrupt_requested(&self) -> bool {
        self.interrupt
            .as_ref()
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    fn emit<F>(&mut self, write: F)
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        if let Err(e) = write(&mut self.out) {
            log::debug!("Failed to write progress output: {}", e);
        }
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
