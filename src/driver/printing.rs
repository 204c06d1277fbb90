//! Driver output formatting feature.

use super::result::RunResult;
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

/// Remove whatever the indicator left on the current line
pub(crate) fn erase_line<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    out.flush()
}

pub(crate) fn write_outcome<W: Write>(
    out: &mut W,
    description: &str,
    failure: Option<&str>,
    verbose: bool,
) -> io::Result<()> {
    writeln!(out, "Cleaning: {} FINISHED", description)?;
    if let (Some(detail), true) = (failure, verbose) {
        writeln!(out, "  └─ {}", detail)?;
    }
    out.flush()
}

pub(crate) fn write_summary<W: Write>(out: &mut W, result: &RunResult) -> io::Result<()> {
    writeln!(out)?;
    if result.interrupted {
        writeln!(
            out,
            "Interrupted after {} of the scheduled tasks",
            result.outcomes.len()
        )?;
    }
    writeln!(out, "Cleaned approx: {} MB disk space", result.freed_mb())?;
    out.flush()
}
