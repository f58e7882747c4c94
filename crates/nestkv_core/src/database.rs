//! Shared database handle.

use crate::config::Config;
use crate::engine::Engine;
use crate::stats::{EngineStats, StatsSnapshot};
use parking_lot::RwLock;
use tracing::{debug, trace};

/// The main database handle.
///
/// `Database` wraps one [`Engine`] in a single reader/writer lock. `get`,
/// `num_equal_to` and `depth` share the read lock; every mutating call holds
/// the write lock for its whole duration, so the key map and the value index
/// are never observed half-updated.
///
/// There is no process-wide instance. The owner creates one and hands out
/// references (or an `Arc`) to whoever needs it:
///
/// ```rust
/// use nestkv_core::Database;
/// use std::sync::Arc;
///
/// let db = Arc::new(Database::new());
/// let reader = Arc::clone(&db);
///
/// db.set("a", "10");
/// std::thread::spawn(move || assert_eq!(reader.num_equal_to("10"), 1))
///     .join()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct Database {
    /// Configuration the database was created with.
    config: Config,
    /// Engine state; one lock covers the base state and the frame stack.
    engine: RwLock<Engine>,
    /// Operation counters.
    stats: EngineStats,
}

impl Database {
    /// Creates an empty database with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty database with custom configuration.
    ///
    /// ```rust
    /// use nestkv_core::{Config, Database};
    ///
    /// let db = Database::with_config(Config::new().implicit_transaction(true));
    /// db.set("a", "1");
    /// assert!(db.rollback());
    /// assert_eq!(db.get("a"), None);
    /// ```
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let mut engine = Engine::with_capacity(config.initial_capacity);
        let stats = EngineStats::new();
        if config.implicit_transaction {
            engine.begin();
            stats.record_begin();
            debug!("opened implicit transaction");
        }

        Self {
            config,
            engine: RwLock::new(engine),
            stats,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Binds `key` to `value`.
    pub fn set(&self, key: &str, value: &str) {
        let mut engine = self.engine.write();
        engine.set(key, value);
        self.stats.record_write();
        trace!(key, value, depth = engine.depth(), "set");
    }

    /// Removes the binding for `key`, if any.
    pub fn unset(&self, key: &str) {
        let mut engine = self.engine.write();
        engine.unset(key);
        self.stats.record_delete();
        trace!(key, depth = engine.depth(), "unset");
    }

    /// Returns the value currently visible for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let engine = self.engine.read();
        self.stats.record_read();
        engine.get(key).map(str::to_owned)
    }

    /// Returns how many keys are currently bound to `value`.
    #[must_use]
    pub fn num_equal_to(&self, value: &str) -> usize {
        let engine = self.engine.read();
        self.stats.record_count_query();
        engine.num_equal_to(value)
    }

    /// Opens a nested transaction.
    pub fn begin(&self) {
        let mut engine = self.engine.write();
        engine.begin();
        self.stats.record_begin();
        debug!(depth = engine.depth(), "begin");
    }

    /// Discards the innermost transaction.
    ///
    /// Returns false when no transaction is open.
    pub fn rollback(&self) -> bool {
        let mut engine = self.engine.write();
        let depth = engine.depth();
        if !engine.rollback() {
            self.stats.record_no_transaction();
            debug!("rollback with no open transaction");
            return false;
        }
        self.stats.record_rollback();
        debug!(depth, "rolled back");
        true
    }

    /// Commits every open transaction at once.
    ///
    /// Returns false when no transaction is open.
    pub fn commit(&self) -> bool {
        let mut engine = self.engine.write();
        let depth = engine.depth();
        if !engine.commit() {
            self.stats.record_no_transaction();
            debug!("commit with no open transaction");
            return false;
        }
        self.stats.record_commit();
        debug!(frames = depth, keys = engine.len(), "committed");
        true
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.engine.read().depth()
    }

    /// Returns a snapshot of the operation counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn end_to_end_scenario() {
        let db = Database::new();

        db.set("a", "10");
        assert_eq!(db.get("a").as_deref(), Some("10"));
        db.set("b", "10");
        assert_eq!(db.num_equal_to("10"), 2);
        db.unset("a");
        assert_eq!(db.num_equal_to("10"), 1);
        db.begin();
        db.set("b", "30");
        assert_eq!(db.num_equal_to("10"), 0);
        assert!(db.rollback());
        assert_eq!(db.get("b").as_deref(), Some("10"));
    }

    #[test]
    fn no_transaction_guard() {
        let db = Database::new();
        assert!(!db.rollback());
        assert!(!db.commit());
        assert_eq!(db.depth(), 0);
        assert_eq!(db.stats().no_transaction, 2);
    }

    #[test]
    fn implicit_transaction_opens_frame() {
        let db = Database::with_config(Config::new().implicit_transaction(true));
        assert!(db.config().implicit_transaction);
        assert_eq!(db.depth(), 1);

        db.set("a", "1");
        assert!(db.commit());
        assert_eq!(db.depth(), 0);
        assert!(!db.rollback());
        assert_eq!(db.get("a").as_deref(), Some("1"));
    }

    #[test]
    fn stats_track_operations() {
        let db = Database::new();
        db.set("a", "1");
        db.unset("a");
        let _ = db.get("a");
        let _ = db.num_equal_to("1");
        db.begin();
        db.begin();
        assert!(db.rollback());
        assert!(db.commit());

        let stats = db.stats();
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.deletes, 1);
        assert_eq!(stats.reads, 1);
        assert_eq!(stats.count_queries, 1);
        assert_eq!(stats.transactions_begun, 2);
        assert_eq!(stats.rollbacks, 1);
        assert_eq!(stats.commits, 1);
    }

    #[test]
    fn concurrent_readers_see_bounded_counts() {
        let db = Arc::new(Database::new());
        for i in 0..50 {
            db.set(&format!("k{i}"), "old");
        }

        let writer = {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for _ in 0..20 {
                    db.begin();
                    for i in 0..50 {
                        db.set(&format!("k{i}"), "new");
                    }
                    assert!(db.commit());

                    db.begin();
                    for i in 0..50 {
                        db.set(&format!("k{i}"), "old");
                    }
                    assert!(db.commit());
                }
            })
        };

        let reader = {
            let db = Arc::clone(&db);
            thread::spawn(move || {
                for _ in 0..200 {
                    assert!(db.num_equal_to("old") <= 50);
                    assert!(db.num_equal_to("new") <= 50);
                    assert!(db.depth() <= 1);
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(db.num_equal_to("old"), 50);
        assert_eq!(db.num_equal_to("new"), 0);
    }
}
