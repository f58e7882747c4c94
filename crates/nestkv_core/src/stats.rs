//! Engine statistics.
//!
//! Counters are updated by [`Database`](crate::Database) on every call and can
//! be read while operations are in progress.
//!
//! ```rust
//! use nestkv_core::Database;
//!
//! let db = Database::new();
//! db.set("a", "1");
//! let _ = db.get("a");
//!
//! let stats = db.stats();
//! assert_eq!(stats.writes, 1);
//! assert_eq!(stats.reads, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for one database.
///
/// All counters are atomic and monotonically increasing.
#[derive(Debug, Default)]
pub struct EngineStats {
    // Operation counters
    /// Number of `get` calls.
    reads: AtomicU64,
    /// Number of `set` calls.
    writes: AtomicU64,
    /// Number of `unset` calls.
    deletes: AtomicU64,
    /// Number of `num_equal_to` calls.
    count_queries: AtomicU64,

    // Transaction counters
    /// Number of transactions begun.
    transactions_begun: AtomicU64,
    /// Number of successful commits (each may flatten several frames).
    commits: AtomicU64,
    /// Number of frames rolled back.
    rollbacks: AtomicU64,
    /// Number of commit or rollback calls made with no open transaction.
    no_transaction: AtomicU64,
}

impl EngineStats {
    /// Creates a zeroed stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_count_query(&self) {
        self.count_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_no_transaction(&self) {
        self.no_transaction.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time copy of every counter.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            count_queries: self.count_queries.load(Ordering::Relaxed),
            transactions_begun: self.transactions_begun.load(Ordering::Relaxed),
            commits: self.commits.load(Ordering::Relaxed),
            rollbacks: self.rollbacks.load(Ordering::Relaxed),
            no_transaction: self.no_transaction.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`EngineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Number of `get` calls.
    pub reads: u64,
    /// Number of `set` calls.
    pub writes: u64,
    /// Number of `unset` calls.
    pub deletes: u64,
    /// Number of `num_equal_to` calls.
    pub count_queries: u64,
    /// Number of transactions begun.
    pub transactions_begun: u64,
    /// Number of successful commits.
    pub commits: u64,
    /// Number of frames rolled back.
    pub rollbacks: u64,
    /// Number of commit or rollback calls refused for lack of a transaction.
    pub no_transaction: u64,
}
