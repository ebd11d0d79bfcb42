//! Seeded random number generation.
//!
//! Every randomness-consuming operation in this crate takes an explicit
//! `&mut R: Rng` handle. [`create_rng`] builds the single generator a run
//! threads through initialization, selection, crossover and mutation, so a
//! fixed seed reproduces the whole run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a 64-bit seed.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_tsp::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Shuffles `values` in place with the Fisher–Yates algorithm.
///
/// Walks `i` from `len - 1` down to `1`, draws `j` uniformly from `[0, i]`
/// and swaps positions `i` and `j`. Every permutation is equally likely.
pub fn shuffle<T, R: Rng>(values: &mut [T], rng: &mut R) {
    for i in (1..values.len()).rev() {
        let j = rng.random_range(0..=i);
        values.swap(i, j);
    }
}

/// Draws a probability uniformly from `[0, 1)`.
pub fn probability<R: Rng>(rng: &mut R) -> f64 {
    rng.random_range(0.0..1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(42);
        let mut b = create_rng(42);
        for _ in 0..32 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = create_rng(1);
        let mut values: Vec<usize> = (0..50).collect();
        shuffle(&mut values, &mut rng);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = create_rng(1);
        let mut empty: Vec<usize> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![9];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_shuffle_reaches_all_permutations_of_three() {
        let mut rng = create_rng(2024);
        let mut counts = std::collections::HashMap::new();
        let n = 6000;
        for _ in 0..n {
            let mut values = [0, 1, 2];
            shuffle(&mut values, &mut rng);
            *counts.entry(values).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 6, "all 3! permutations reachable: {counts:?}");
        for (perm, &c) in &counts {
            assert!(c > 800, "permutation {perm:?} drawn only {c}/{n} times");
        }
    }

    #[test]
    fn test_probability_range() {
        let mut rng = create_rng(3);
        for _ in 0..1000 {
            let p = probability(&mut rng);
            assert!((0.0..1.0).contains(&p));
        }
    }
}
