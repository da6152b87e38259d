//! Deterministic string hashes used in place of randomness.
//!
//! Both operate on Unicode scalar values (`char as u32`), never on a
//! platform hasher, so every run and every build produces the same numbers.

/// Sum of the code points of `seed`.
pub fn code_point_sum(seed: &str) -> u64 {
    seed.chars().map(|c| c as u64).sum()
}

/// Polynomial rolling fold `acc = (acc * 33 + code) mod 1000`, starting at 7.
/// Always in `0..1000`.
pub fn rolling_mod_1000(seed: &str) -> u64 {
    seed.chars().fold(7u64, |acc, c| (acc * 33 + c as u64) % 1000)
}

/// `rolling_mod_1000(seed) / 1000`, a factor in `[0, 1)`.
pub fn unit_factor(seed: &str) -> f64 {
    rolling_mod_1000(seed) as f64 / 1000.0
}
