//! Property-based test generators using proptest.
//!
//! Keys and values come from small fixed alphabets so random sequences keep
//! hitting the same keys across nesting levels. The empty string is one of
//! the values, so "bound to empty" and "unset" get exercised side by side.

use crate::store::KvStore;
use proptest::prelude::*;

/// Keys used by generated operations.
pub const KEYS: &[&str] = &["a", "b", "c", "d", "e"];

/// Values used by generated operations.
pub const VALUES: &[&str] = &["", "10", "20", "30"];

/// Strategy for a key from [`KEYS`].
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(KEYS).prop_map(str::to_owned)
}

/// Strategy for a value from [`VALUES`].
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(VALUES).prop_map(str::to_owned)
}

/// A mutating store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Bind a key.
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Remove a key.
    Unset {
        /// Key
        key: String,
    },
    /// Open a transaction.
    Begin,
    /// Discard the innermost transaction.
    Rollback,
    /// Commit all transactions.
    Commit,
}

impl Op {
    /// Applies the operation, returning the result of `ROLLBACK`/`COMMIT`.
    pub fn apply<S: KvStore + ?Sized>(&self, store: &mut S) -> Option<bool> {
        match self {
            Self::Set { key, value } => {
                store.set(key, value);
                None
            }
            Self::Unset { key } => {
                store.unset(key);
                None
            }
            Self::Begin => {
                store.begin();
                None
            }
            Self::Rollback => Some(store.rollback()),
            Self::Commit => Some(store.commit()),
        }
    }
}

/// Strategy for a `SET` or `UNSET`.
pub fn write_op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (key_strategy(), value_strategy()).prop_map(|(key, value)| Op::Set { key, value }),
        1 => key_strategy().prop_map(|key| Op::Unset { key }),
    ]
}

/// Strategy for any operation, weighted toward writes.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => write_op_strategy(),
        2 => Just(Op::Begin),
        1 => Just(Op::Rollback),
        1 => Just(Op::Commit),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn op_sequence_strategy(min_ops: usize, max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), min_ops..max_ops)
}

/// Environment variable naming the property test profile.
pub const PROFILE_ENV: &str = "NESTKV_PROPTEST";

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Selects a profile by name: `quick`, `thorough`, anything else is the default.
    #[must_use]
    pub fn from_profile(name: Option<&str>) -> Self {
        match name {
            Some("quick") => Self::quick(),
            Some("thorough") => Self::thorough(),
            _ => Self::default(),
        }
    }

    /// Selects a profile from the `NESTKV_PROPTEST` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_profile(std::env::var(PROFILE_ENV).ok().as_deref())
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
