//! # nestkv Testkit
//!
//! Test utilities for nestkv.
//!
//! This crate provides:
//! - [`KvStore`], one interface over the engine, the locked database and the model
//! - [`ReferenceModel`], a copy-on-begin store used as the oracle for the engine
//! - Property-based test generators using proptest
//! - Transcript helpers for driving a database with protocol text
//!
//! ## Usage
//!
//! ```rust
//! use nestkv_testkit::prelude::*;
//!
//! let db = nestkv_core::Database::new();
//! assert_eq!(transcript(&db, "SET a 1\nGET a\n"), vec!["1"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;
pub mod store;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use crate::store::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
pub use store::*;
