//! Error types for nestkv core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while turning a text line into a [`Command`](crate::Command).
///
/// Engine operations themselves never fail; these errors only describe input
/// the session layer should skip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The line contained no tokens.
    #[error("empty command")]
    EmptyCommand,

    /// The first token is not a known command name.
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// The unrecognized command name.
        name: String,
    },

    /// The command was given the wrong number of arguments.
    #[error("{command} expects {expected} argument(s), got {actual}")]
    WrongArity {
        /// The command name.
        command: &'static str,
        /// Number of arguments the command takes.
        expected: usize,
        /// Number of arguments supplied.
        actual: usize,
    },
}

impl CoreError {
    /// Creates an unknown command error.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Creates a wrong arity error.
    pub fn wrong_arity(command: &'static str, expected: usize, actual: usize) -> Self {
        Self::WrongArity {
            command,
            expected,
            actual,
        }
    }
}
