//! External command runner.

use crate::error::CommandError;
use std::io::{self, Read};
use std::process::{Command, Stdio};

/// Upper bound on captured output kept in a failure
const MAX_CAPTURED_OUTPUT: usize = 8 * 1024;

/// Run `argv[0]` with the remaining arguments and wait for it.
///
/// stdout and stderr share one pipe, so the returned text is the
/// interleaved output in the order the program wrote it, trimmed.
pub fn run_command(argv: &[String]) -> Result<String, CommandError> {
    let (program, args) = argv.split_first().ok_or(CommandError::Empty)?;
    let command_line = argv.join(" ");
    let spawn_error = |source: io::Error| CommandError::Spawn {
        command: command_line.clone(),
        source,
    };

    let (mut reader, writer) = io::pipe().map_err(spawn_error)?;
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(writer.try_clone().map_err(spawn_error)?)
        .stderr(writer);

    let mut child = command.spawn().map_err(spawn_error)?;
    // `command` still owns both write ends; the read below only sees EOF once they are closed
    drop(command);

    let mut raw = Vec::new();
    let read = reader.read_to_end(&mut raw);
    let status = child.wait().map_err(spawn_error)?;
    read.map_err(spawn_error)?;

    let output = String::from_utf8_lossy(&raw).trim().to_string();
    log::debug!("'{}' exited with {}: {}", command_line, status, output);

    if status.success() {
        Ok(output)
    } else {
        Err(CommandError::Failed {
            command: command_line,
            status,
            output: truncate_output(output),
        })
    }
}

fn truncate_output(mut output: String) -> String {
    if output.len() <= MAX_CAPTURED_OUTPUT {
        return output;
    }
    let mut cut = MAX_CAPTURED_OUTPUT;
    while !output.is_char_boundary(cut) {
        cut -= 1;
    }
    output.truncate(cut);
    output.push_str("\n... (output truncated)");
    output
}
