//! Common interface over every store under test.

use nestkv_core::{Database, Engine};

/// The seven protocol operations, independent of locking or representation.
pub trait KvStore {
    /// Binds `key` to `value`.
    fn set(&mut self, key: &str, value: &str);
    /// Removes `key`.
    fn unset(&mut self, key: &str);
    /// Returns the visible value of `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Returns how many keys are bound to `value`.
    fn num_equal_to(&self, value: &str) -> usize;
    /// Opens a transaction.
    fn begin(&mut self);
    /// Discards the innermost transaction.
    fn rollback(&mut self) -> bool;
    /// Commits every open transaction.
    fn commit(&mut self) -> bool;
    /// Returns the number of open transactions.
    fn depth(&self) -> usize;
}

impl KvStore for Engine {
    fn set(&mut self, key: &str, value: &str) {
        Engine::set(self, key, value);
    }

    fn unset(&mut self, key: &str) {
        Engine::unset(self, key);
    }

    fn get(&self, key: &str) -> Option<String> {
        Engine::get(self, key).map(str::to_owned)
    }

    fn num_equal_to(&self, value: &str) -> usize {
        Engine::num_equal_to(self, value)
    }

    fn begin(&mut self) {
        Engine::begin(self);
    }

    fn rollback(&mut self) -> bool {
        Engine::rollback(self)
    }

    fn commit(&mut self) -> bool {
        Engine::commit(self)
    }

    fn depth(&self) -> usize {
        Engine::depth(self)
    }
}

impl KvStore for Database {
    fn set(&mut self, key: &str, value: &str) {
        Database::set(self, key, value);
    }

    fn unset(&mut self, key: &str) {
        Database::unset(self, key);
    }

    fn get(&self, key: &str) -> Option<String> {
        Database::get(self, key)
    }

    fn num_equal_to(&self, value: &str) -> usize {
        Database::num_equal_to(self, value)
    }

    fn begin(&mut self) {
        Database::begin(self);
    }

    fn rollback(&mut self) -> bool {
        Database::rollback(self)
    }

    fn commit(&mut self) -> bool {
        Database::commit(self)
    }

    fn depth(&self) -> usize {
        Database::depth(self)
    }
}

/// Everything observable about a store over a fixed key and value universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// `get` result for each key, in universe order.
    pub values: Vec<Option<String>>,
    /// `num_equal_to` result for each value, in universe order.
    pub counts: Vec<usize>,
    /// Open transactions.
    pub depth: usize,
}

/// Reads every key in `keys` and counts every value in `values`.
pub fn observe<S: KvStore + ?Sized>(store: &S, keys: &[&str], values: &[&str]) -> Observation {
    Observation {
        values: keys.iter().map(|k| store.get(k)).collect(),
        counts: values.iter().map(|v| store.num_equal_to(v)).collect(),
        depth: store.depth(),
    }
}
