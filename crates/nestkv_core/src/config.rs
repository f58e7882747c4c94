//! Database configuration.

/// Configuration for creating a database.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Number of keys to reserve room for in the base state.
    pub initial_capacity: usize,

    /// Whether to open one transaction as soon as the database is created.
    ///
    /// With this set, a `ROLLBACK` issued before any explicit `BEGIN`
    /// discards everything written since start-up.
    pub implicit_transaction: bool,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base state capacity hint.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets whether a transaction is opened on creation.
    #[must_use]
    pub const fn implicit_transaction(mut self, value: bool) -> Self {
        self.implicit_transaction = value;
        self
    }
}
