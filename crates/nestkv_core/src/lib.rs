//! # nestkv Core
//!
//! In-memory key/value engine with nested transactions.
//!
//! This crate provides:
//! - A reverse value index answering "how many keys hold `v`" without scanning
//! - Transaction frames that overlay pending writes and deletes on the base state
//! - An [`Engine`] resolving reads through the frame stack
//! - A lock-protected [`Database`] handle for sharing the engine between callers
//! - The line-oriented [`Command`] grammar and its [`Reply`] rendering
//!
//! ```rust
//! use nestkv_core::Database;
//!
//! let db = Database::new();
//! db.set("a", "10");
//! db.begin();
//! db.set("a", "20");
//! assert_eq!(db.num_equal_to("10"), 0);
//! assert!(db.rollback());
//! assert_eq!(db.get("a").as_deref(), Some("10"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod database;
mod engine;
mod error;
mod index;
mod stats;
mod transaction;

pub use command::{Command, Reply};
pub use config::Config;
pub use database::Database;
pub use engine::Engine;
pub use error::{CoreError, CoreResult};
pub use index::{CountDelta, ValueIndex};
pub use stats::{EngineStats, StatsSnapshot};
pub use transaction::{Override, TransactionFrame};

/// Crate version, as recorded in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
