//! Line-oriented command session.

use nestkv_core::{Command, Database};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// What happened during one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines read, including blank and ignored ones.
    pub lines: u64,
    /// Commands executed.
    pub executed: u64,
    /// Non-blank lines skipped because they did not parse.
    pub ignored: u64,
    /// Whether the session stopped at `END` rather than end of input.
    pub ended: bool,
}

/// Reads commands from `input` until `END` or end of input.
///
/// Each reply line is written to `output` and flushed immediately. Blank
/// lines, lines that are not UTF-8, unknown commands and wrong argument
/// counts produce no output and leave the database untouched. Only I/O
/// errors end the session early.
pub fn run<R: BufRead, W: Write>(
    db: &Database,
    input: R,
    mut output: W,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    for raw in input.split(b'\n') {
        let mut raw = raw?;
        summary.lines += 1;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }

        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(err) => {
                debug!(line = summary.lines, "ignoring input: {err}");
                summary.ignored += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                debug!(line = summary.lines, "ignoring input: {err}");
                summary.ignored += 1;
                continue;
            }
        };

        let reply = db.execute(&command);
        summary.executed += 1;
        if reply.is_end() {
            summary.ended = true;
            break;
        }
        if let Some(text) = reply.line() {
            writeln!(output, "{text}")?;
            output.flush()?;
        }
    }

    Ok(summary)
}
