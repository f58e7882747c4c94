//! Benchmark utilities.

#![warn(missing_docs)]

use rand::Rng;

/// Generates `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key{i}")).collect()
}

/// Generates `count` values drawn from `distinct` possibilities.
pub fn random_values(count: usize, distinct: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| rng.gen_range(0..distinct.max(1)).to_string())
        .collect()
}
