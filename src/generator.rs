//! Seeded input generation for benchmarks and tests.
//!
//! Inputs are drawn from [`StdRng`] so a given `(n, seed)` pair always yields
//! the same sequence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Values are drawn from `0..VALUE_RANGE`.
pub const VALUE_RANGE: i32 = 10;

/// Generates a shuffled sequence in which one value fills `ceil(n / 2)` slots.
///
/// For odd `n` the planted value is a strict majority.  For even `n` it fills
/// exactly half the slots and becomes a majority only if the uniform filler
/// happens to draw it at least once more.  The generator is seeded with
/// `seed + n` so that each size gets its own stream.
pub fn generate_majority_input(n: usize, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(n as u64));
    let majority = rng.gen_range(0..VALUE_RANGE);
    let planted = n / 2 + n % 2;

    let mut values = Vec::with_capacity(n);
    values.extend(std::iter::repeat(majority).take(planted));
    values.extend((planted..n).map(|_| rng.gen_range(0..VALUE_RANGE)));
    values.shuffle(&mut rng);
    values
}

/// Generates `n` values drawn uniformly from `0..bound`.
///
/// # Panics
///
/// Panics if `bound` is not positive.
pub fn generate_uniform_input(n: usize, bound: i32, seed: u64) -> Vec<i32> {
    assert!(bound > 0, "bound must be positive");
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..bound)).collect()
}
