//! Line-oriented command grammar.
//!
//! One command per line, tokens separated by whitespace, names case-sensitive:
//!
//! | Command | Arguments | Reply |
//! |---|---|---|
//! | `SET k v` | 2 | none |
//! | `GET k` | 1 | the value, or `NULL` |
//! | `UNSET k` | 1 | none |
//! | `NUMEQUALTO v` | 1 | the count |
//! | `BEGIN` | 0 | none |
//! | `ROLLBACK` | 0 | `NO TRANSACTION` if none is open |
//! | `COMMIT` | 0 | `NO TRANSACTION` if none is open |
//! | `END` | 0 | none; ends the session |

use crate::database::Database;
use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// Text printed by `GET` for an absent key.
pub const NULL: &str = "NULL";

/// Text printed when `COMMIT` or `ROLLBACK` finds nothing to act on.
pub const NO_TRANSACTION: &str = "NO TRANSACTION";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET key value`
    Set {
        /// Key to bind.
        key: String,
        /// Value to bind it to.
        value: String,
    },
    /// `GET key`
    Get {
        /// Key to read.
        key: String,
    },
    /// `UNSET key`
    Unset {
        /// Key to remove.
        key: String,
    },
    /// `NUMEQUALTO value`
    NumEqualTo {
        /// Value to count.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `ROLLBACK`
    Rollback,
    /// `COMMIT`
    Commit,
    /// `END`
    End,
}

impl Command {
    /// Returns the protocol name of the command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Set { .. } => "SET",
            Self::Get { .. } => "GET",
            Self::Unset { .. } => "UNSET",
            Self::NumEqualTo { .. } => "NUMEQUALTO",
            Self::Begin => "BEGIN",
            Self::Rollback => "ROLLBACK",
            Self::Commit => "COMMIT",
            Self::End => "END",
        }
    }
}

/// Checks that `args` holds exactly `N` tokens.
fn arity<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> CoreResult<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| CoreError::wrong_arity(command, N, args.len()))
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(line: &str) -> CoreResult<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(CoreError::EmptyCommand)?;
        let args: Vec<&str> = tokens.collect();

        let command = match name {
            "SET" => {
                let [key, value] = arity("SET", &args)?;
                Self::Set {
                    key: key.to_owned(),
                    value: value.to_owned(),
                }
            }
            "GET" => {
                let [key] = arity("GET", &args)?;
                Self::Get { key: key.to_owned() }
            }
            "UNSET" => {
                let [key] = arity("UNSET", &args)?;
                Self::Unset { key: key.to_owned() }
            }
            "NUMEQUALTO" => {
                let [value] = arity("NUMEQUALTO", &args)?;
                Self::NumEqualTo {
                    value: value.to_owned(),
                }
            }
            "BEGIN" => {
                arity::<0>("BEGIN", &args)?;
                Self::Begin
            }
            "ROLLBACK" => {
                arity::<0>("ROLLBACK", &args)?;
                Self::Rollback
            }
            "COMMIT" => {
                arity::<0>("COMMIT", &args)?;
                Self::Commit
            }
            "END" => {
                arity::<0>("END", &args)?;
                Self::End
            }
            other => return Err(CoreError::unknown_command(other)),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { key, value } => write!(f, "SET {key} {value}"),
            Self::Get { key } => write!(f, "GET {key}"),
            Self::Unset { key } => write!(f, "UNSET {key}"),
            Self::NumEqualTo { value } => write!(f, "NUMEQUALTO {value}"),
            _ => f.write_str(self.name()),
        }
    }
}

/// Outcome of executing a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The command produces no output.
    Ok,
    /// Result of `GET`.
    Value(Option<String>),
    /// Result of `NUMEQUALTO`.
    Count(usize),
    /// `COMMIT` or `ROLLBACK` found no open transaction.
    NoTransaction,
    /// The session should stop.
    End,
}

impl Reply {
    /// Returns the line to print for this reply, if any.
    #[must_use]
    pub fn line(&self) -> Option<String> {
        match self {
            Self::Ok | Self::End => None,
            Self::Value(Some(value)) => Some(value.clone()),
            Self::Value(None) => Some(NULL.to_owned()),
            Self::Count(count) => Some(count.to_string()),
            Self::NoTransaction => Some(NO_TRANSACTION.to_owned()),
        }
    }

    /// Returns true if the session should stop after this reply.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl Database {
    /// Executes one parsed command.
    pub fn execute(&self, command: &Command) -> Reply {
        match command {
            Command::Set { key, value } => {
                self.set(key, value);
                Reply::Ok
            }
            Command::Get { key } => Reply::Value(self.get(key)),
            Command::Unset { key } => {
                self.unset(key);
                Reply::Ok
            }
            Command::NumEqualTo { value } => Reply::Count(self.num_equal_to(value)),
            Command::Begin => {
                self.begin();
                Reply::Ok
            }
            Command::Rollback => {
                if self.rollback() {
                    Reply::Ok
                } else {
                    Reply::NoTransaction
                }
            }
            Command::Commit => {
                if self.commit() {
                    Reply::Ok
                } else {
                    Reply::NoTransaction
                }
            }
            Command::End => Reply::End,
        }
    }
}
