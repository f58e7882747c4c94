//! Transactional state engine.

use crate::index::ValueIndex;
use crate::transaction::{Override, TransactionFrame};
use std::collections::HashMap;

/// Single-session key/value engine with nested transactions.
///
/// Committed data lives in the base map and its [`ValueIndex`]. Every open
/// transaction is a [`TransactionFrame`] overlaying the frames below it;
/// nothing is copied on `begin`.
///
/// `Engine` takes `&mut self` for writes and is not synchronized. Use
/// [`Database`](crate::Database) to share it between callers.
#[derive(Debug, Default)]
pub struct Engine {
    /// Committed key/value bindings.
    data: HashMap<String, String>,
    /// Committed count of keys per value.
    index: ValueIndex,
    /// Open transactions, innermost last.
    frames: Vec<TransactionFrame>,
}

impl Engine {
    /// Creates an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine with room for `capacity` committed keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity),
            index: ValueIndex::with_capacity(capacity),
            frames: Vec::new(),
        }
    }

    /// Binds `key` to `value`.
    ///
    /// Inside a transaction only the innermost frame changes.
    pub fn set(&mut self, key: &str, value: &str) {
        if self.frames.is_empty() {
            self.apply_set(key, value);
            return;
        }

        let previous = self.get(key).map(str::to_owned);
        if let Some(frame) = self.frames.last_mut() {
            frame.bind(key, value, previous.as_deref());
        }
    }

    /// Removes the binding for `key`. Unsetting an absent key does nothing.
    pub fn unset(&mut self, key: &str) {
        if self.frames.is_empty() {
            self.apply_unset(key);
            return;
        }

        let Some(previous) = self.get(key).map(str::to_owned) else {
            return;
        };
        if let Some(frame) = self.frames.last_mut() {
            frame.tombstone(key, &previous);
        }
    }

    /// Returns the value visible for `key`.
    ///
    /// The innermost frame with an opinion about `key` wins; with none, the
    /// committed value is returned.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        for frame in self.frames.iter().rev() {
            if let Some(found) = frame.lookup(key) {
                return found.value();
            }
        }
        self.data.get(key).map(String::as_str)
    }

    /// Returns how many keys are visibly bound to `value`.
    #[must_use]
    pub fn num_equal_to(&self, value: &str) -> usize {
        let committed = self.index.count(value) as i64;
        let pending: i64 = self.frames.iter().map(|f| f.count_delta(value)).sum();
        let total = committed + pending;
        debug_assert!(total >= 0, "negative count for {value:?}");
        usize::try_from(total).unwrap_or(0)
    }

    /// Opens a new, innermost transaction.
    pub fn begin(&mut self) {
        self.frames.push(TransactionFrame::new());
    }

    /// Discards the innermost transaction.
    ///
    /// Returns false, changing nothing, when no transaction is open.
    pub fn rollback(&mut self) -> bool {
        self.frames.pop().is_some()
    }

    /// Commits every open transaction into the base state.
    ///
    /// Frames are applied oldest first so the newest write to a key wins.
    /// Returns false, changing nothing, when no transaction is open.
    pub fn commit(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }

        let frames = std::mem::take(&mut self.frames);
        for frame in frames {
            for (key, change) in frame.into_overrides() {
                match change {
                    Override::Bound(value) => self.apply_set(&key, &value),
                    Override::Tombstone => self.apply_unset(&key),
                }
            }
        }
        true
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Returns the number of committed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing is committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn apply_set(&mut self, key: &str, value: &str) {
        if let Some(old) = self.data.insert(key.to_owned(), value.to_owned()) {
            self.index.decrement(&old);
        }
        self.index.increment(value);
    }

    fn apply_unset(&mut self, key: &str) {
        if let Some(old) = self.data.remove(key) {
            self.index.decrement(&old);
        }
    }
}
