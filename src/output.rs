use crate::catalog::Catalog;
use crate::context::ExecutionContext;
use crate::disk::format_mb;
use crate::driver::{RunResult, TaskOutcome};
use crate::platform::{Mode, Platform};
use serde::Serialize;
use std::io::{self, Write};

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,   // Only errors
    Normal,  // Standard output
    Verbose, // Failure details
}

impl OutputMode {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            OutputMode::Quiet
        } else if verbose > 0 {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

/// Write the catalog preview: one entry per task with its resolved detail
pub fn write_preview<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    for task in catalog {
        writeln!(out, "Cleaning: {}", task.description())?;
        let detail = task.detail();
        if !detail.is_empty() {
            writeln!(out, "  └─ {}", detail)?;
        }
    }
    out.flush()
}

#[derive(Serialize)]
struct JsonRun<'a> {
    version: &'static str,
    timestamp: String,
    platform: Platform,
    mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a str>,
    interrupted: bool,
    summary: JsonSummary,
    outcomes: &'a [TaskOutcome],
}

#[derive(Serialize)]
struct JsonSummary {
    tasks: usize,
    succeeded: usize,
    failed: usize,
    start_free_mb: Option<u64>,
    end_free_mb: Option<u64>,
    freed_mb: u64,
    freed_human: String,
}

/// Render a finished run as pretty JSON
pub fn summary_json(ctx: &ExecutionContext, result: &RunResult) -> serde_json::Result<String> {
    let run = JsonRun {
        version: "1.0",
        timestamp: chrono::Utc::now().to_rfc3339(),
        platform: ctx.platform,
        mode: ctx.mode,
        profile: ctx.profile().map(|p| p.name()),
        interrupted: result.interrupted,
        summary: JsonSummary {
            tasks: result.outcomes.len(),
            succeeded: result.succeeded_count(),
            failed: result.failed_count(),
            start_free_mb: result.start_free_mb,
            end_free_mb: result.end_free_mb,
            freed_mb: result.freed_mb(),
            freed_human: format_mb(result.freed_mb()),
        },
        outcomes: &result.outcomes,
    };
    serde_json::to_string_pretty(&run)
}

pub fn print_json(ctx: &ExecutionContext, result: &RunResult) -> anyhow::Result<()> {
    println!("{}", summary_json(ctx, result)?);
    Ok(())
}
