//! Transcript helpers.
//!
//! Drive a [`Database`] with protocol text the way the CLI session does and
//! collect the output lines.

use nestkv_core::{Command, Database};

/// Runs `script` line by line and returns the reply lines.
///
/// Malformed lines are skipped and `END` stops the script, matching the CLI.
pub fn transcript(db: &Database, script: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in script.lines() {
        let Ok(command) = line.parse::<Command>() else {
            continue;
        };
        let reply = db.execute(&command);
        if reply.is_end() {
            break;
        }
        out.extend(reply.line());
    }
    out
}

/// Runs `script` against a fresh database.
pub fn run_script(script: &str) -> Vec<String> {
    transcript(&Database::new(), script)
}
