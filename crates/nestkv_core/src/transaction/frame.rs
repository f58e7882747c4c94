//! A single transaction overlay.

use crate::index::CountDelta;
use std::collections::HashMap;

/// What a frame says about one key.
///
/// A key with no `Override` in a frame defers to the frames below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// The key is bound to this value within the frame.
    Bound(String),
    /// The key was unset within the frame.
    Tombstone,
}

impl Override {
    /// Returns the bound value, or `None` for a tombstone.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Bound(value) => Some(value.as_str()),
            Self::Tombstone => None,
        }
    }
}

/// Pending writes and deletes of one nested transaction.
///
/// `counts` is kept relative to the visible state below this frame, so the
/// visible count of a value is the committed count plus the sum of every open
/// frame's delta.
#[derive(Debug, Clone, Default)]
pub struct TransactionFrame {
    /// Keys touched since this frame's `BEGIN`.
    overrides: HashMap<String, Override>,
    /// Net change this frame contributes to each value's count.
    counts: CountDelta,
}

impl TransactionFrame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this frame's override for `key`, if it has one.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Override> {
        self.overrides.get(key)
    }

    /// Binds `key` to `value`.
    ///
    /// `previous` must be the value visible for `key` just before the write.
    pub fn bind(&mut self, key: &str, value: &str, previous: Option<&str>) {
        if let Some(previous) = previous {
            self.counts.adjust(previous, -1);
        }
        self.counts.adjust(value, 1);
        self.overrides
            .insert(key.to_owned(), Override::Bound(value.to_owned()));
    }

    /// Marks `key` as unset.
    ///
    /// `previous` must be the value visible for `key` just before the delete.
    pub fn tombstone(&mut self, key: &str, previous: &str) {
        self.counts.adjust(previous, -1);
        self.overrides.insert(key.to_owned(), Override::Tombstone);
    }

    /// Returns this frame's net change to the count of `value`.
    #[must_use]
    pub fn count_delta(&self, value: &str) -> i64 {
        self.counts.get(value)
    }

    /// Iterates over the overrides recorded in this frame.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &Override)> {
        self.overrides.iter().map(|(k, o)| (k.as_str(), o))
    }

    /// Consumes the frame, yielding its overrides.
    pub fn into_overrides(self) -> impl Iterator<Item = (String, Override)> {
        self.overrides.into_iter()
    }

    /// Returns the number of keys touched in this frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Returns true if the frame touched no key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_empty() {
        let frame = TransactionFrame::new();
        assert!(frame.is_empty());
        assert!(frame.lookup("a").is_none());
        assert_eq!(frame.count_delta("10"), 0);
    }

    #[test]
    fn bind_fresh_key() {
        let mut frame = TransactionFrame::new();
        frame.bind("a", "10", None);

        assert_eq!(frame.lookup("a"), Some(&Override::Bound("10".into())));
        assert_eq!(frame.count_delta("10"), 1);
    }

    #[test]
    fn rebind_moves_count() {
        let mut frame = TransactionFrame::new();
        frame.bind("a", "10", None);
        frame.bind("a", "20", Some("10"));

        assert_eq!(frame.len(), 1);
        assert_eq!(frame.count_delta("10"), 0);
        assert_eq!(frame.count_delta("20"), 1);
    }

    #[test]
    fn rebind_same_value_is_neutral() {
        let mut frame = TransactionFrame::new();
        frame.bind("a", "10", Some("10"));
        assert_eq!(frame.count_delta("10"), 0);
        assert_eq!(frame.lookup("a").and_then(Override::value), Some("10"));
    }

    #[test]
    fn tombstone_hides_key() {
        let mut frame = TransactionFrame::new();
        frame.tombstone("a", "10");

        assert_eq!(frame.lookup("a"), Some(&Override::Tombstone));
        assert_eq!(frame.count_delta("10"), -1);
    }

    #[test]
    fn empty_value_is_not_a_tombstone() {
        let mut frame = TransactionFrame::new();
        frame.bind("a", "", None);

        assert_eq!(frame.lookup("a").and_then(Override::value), Some(""));
        assert_eq!(frame.count_delta(""), 1);
    }

    #[test]
    fn overrides_lists_touched_keys() {
        let mut frame = TransactionFrame::new();
        frame.bind("a", "10", None);
        frame.tombstone("b", "20");

        let mut touched: Vec<_> = frame.overrides().collect();
        touched.sort_by_key(|(key, _)| *key);
        assert_eq!(
            touched,
            vec![("a", &Override::Bound("10".into())), ("b", &Override::Tombstone)]
        );
        assert_eq!(frame.len(), 2);
    }
}
