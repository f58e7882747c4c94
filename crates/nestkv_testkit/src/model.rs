//! Copy-on-begin reference store.
//!
//! [`ReferenceModel`] keeps a full copy of the key map per open transaction
//! and counts values by scanning. It is slow and obviously correct, which is
//! what an oracle for the overlay engine needs.

use crate::store::KvStore;
use std::collections::HashMap;

/// Full-state stack store.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    /// Bottom entry is the committed state; each `begin` pushes a copy of the top.
    states: Vec<HashMap<String, String>>,
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: vec![HashMap::new()],
        }
    }

    fn top(&self) -> &HashMap<String, String> {
        self.states.last().expect("model always has a committed state")
    }

    fn top_mut(&mut self) -> &mut HashMap<String, String> {
        self.states
            .last_mut()
            .expect("model always has a committed state")
    }

    /// Returns the committed keys and values, as `COMMIT` would leave them.
    #[must_use]
    pub fn committed(&self) -> &HashMap<String, String> {
        &self.states[0]
    }
}

impl KvStore for ReferenceModel {
    fn set(&mut self, key: &str, value: &str) {
        self.top_mut().insert(key.to_owned(), value.to_owned());
    }

    fn unset(&mut self, key: &str) {
        self.top_mut().remove(key);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.top().get(key).cloned()
    }

    fn num_equal_to(&self, value: &str) -> usize {
        self.top().values().filter(|v| v.as_str() == value).count()
    }

    fn begin(&mut self) {
        let copy = self.top().clone();
        self.states.push(copy);
    }

    fn rollback(&mut self) -> bool {
        if self.states.len() <= 1 {
            return false;
        }
        self.states.pop();
        true
    }

    fn commit(&mut self) -> bool {
        if self.states.len() <= 1 {
            return false;
        }
        let top = self.states.pop().expect("checked above");
        self.states.truncate(1);
        self.states[0] = top;
        true
    }

    fn depth(&self) -> usize {
        self.states.len() - 1
    }
}
