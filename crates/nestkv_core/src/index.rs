//! Reverse value indexes.
//!
//! [`ValueIndex`] holds the committed number of keys bound to each value.
//! [`CountDelta`] holds a transaction frame's signed change to those numbers.
//! Neither ever stores a zero entry, so an absent value and a value with no
//! keys are indistinguishable.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Value to key-count mapping for committed state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueIndex {
    counts: HashMap<String, usize>,
}

impl ValueIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty index with room for `capacity` distinct values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity(capacity),
        }
    }

    /// Records one more key bound to `value`.
    pub fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_owned(), 1);
            }
        }
    }

    /// Records one fewer key bound to `value`.
    ///
    /// The entry is dropped when it reaches zero. Decrementing a value that
    /// is not indexed does nothing.
    pub fn decrement(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(value);
            }
        }
    }

    /// Returns how many keys are bound to `value`.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the number of distinct values indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no value is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(value, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(v, c)| (v.as_str(), *c))
    }
}

/// Signed per-value count changes contributed by one transaction frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountDelta {
    deltas: HashMap<String, i64>,
}

impl CountDelta {
    /// Creates an empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the change recorded for `value`.
    pub fn adjust(&mut self, value: &str, delta: i64) {
        if delta == 0 {
            return;
        }
        match self.deltas.entry(value.to_owned()) {
            Entry::Occupied(mut slot) => {
                *slot.get_mut() += delta;
                if *slot.get() == 0 {
                    slot.remove();
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(delta);
            }
        }
    }

    /// Returns the net change recorded for `value`.
    #[must_use]
    pub fn get(&self, value: &str) -> i64 {
        self.deltas.get(value).copied().unwrap_or(0)
    }

    /// Returns the number of values with a non-zero change.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Returns true if the frame leaves every count unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_and_count() {
        let mut index = ValueIndex::new();
        index.increment("10");
        index.increment("10");
        index.increment("20");

        assert_eq!(index.count("10"), 2);
        assert_eq!(index.count("20"), 1);
        assert_eq!(index.count("30"), 0);
        assert_eq!(index.len(), 2);

        let mut entries: Vec<_> = index.iter().collect();
        entries.sort_unstable();
        assert_eq!(entries, vec![("10", 2), ("20", 1)]);
    }

    #[test]
    fn decrement_removes_at_zero() {
        let mut index = ValueIndex::new();
        index.increment("10");
        index.decrement("10");

        assert_eq!(index.count("10"), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn decrement_absent_is_noop() {
        let mut index = ValueIndex::new();
        index.decrement("missing");
        assert!(index.is_empty());
    }

    #[test]
    fn empty_string_is_a_value() {
        let mut index = ValueIndex::new();
        index.increment("");
        assert_eq!(index.count(""), 1);
    }

    #[test]
    fn delta_nets_to_zero_is_dropped() {
        let mut delta = CountDelta::new();
        delta.adjust("10", 1);
        delta.adjust("20", -1);
        assert_eq!(delta.len(), 2);

        delta.adjust("10", -1);
        assert_eq!(delta.get("10"), 0);
        assert_eq!(delta.len(), 1);

        delta.adjust("20", 1);
        assert!(delta.is_empty());
    }

    #[test]
    fn delta_zero_adjust_records_nothing() {
        let mut delta = CountDelta::new();
        delta.adjust("10", 0);
        assert!(delta.is_empty());
    }

    #[test]
    fn delta_can_go_negative() {
        let mut delta = CountDelta::new();
        delta.adjust("10", -1);
        delta.adjust("10", -1);
        assert_eq!(delta.get("10"), -2);
    }
}
