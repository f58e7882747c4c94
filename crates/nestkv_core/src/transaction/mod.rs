//! Transaction frames.
//!
//! Each open `BEGIN` owns one [`TransactionFrame`] holding only the keys it
//! touched. Frames stack: reads walk them innermost first, rollback drops the
//! top one, and commit folds all of them into the base state.

mod frame;

pub use frame::{Override, TransactionFrame};
