//! Tour construction and variation operators.
//!
//! # Construction
//!
//! - [`random_tour`]: uniformly random permutation (Fisher–Yates), evaluated
//!
//! # Variation
//!
//! - [`crossover`]: Order Crossover (OX) followed by an optional swap
//!   mutation, evaluated
//! - [`order_crossover`]: the raw OX recombination for a given segment
//! - [`swap_mutation`]: exchange two distinct positions
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::error::GaError;
use super::types::Tour;
use crate::distance::DistanceProvider;
use crate::random::{probability, shuffle};
use rand::Rng;

// ============================================================================
// Construction
// ============================================================================

/// Identity permutation `[0, 1, .., n-1]` shuffled with Fisher–Yates.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut cities: Vec<usize> = (0..n).collect();
    shuffle(&mut cities, rng);
    cities
}

/// Builds a uniformly random tour over the provider's cities and evaluates it.
pub fn random_tour<D: DistanceProvider + ?Sized, R: Rng>(
    provider: &D,
    rng: &mut R,
) -> Result<Tour, GaError> {
    let mut tour = Tour::from_permutation(random_permutation(provider.city_count(), rng));
    tour.evaluate(provider)?;
    Ok(tour)
}

// ============================================================================
// Crossover
// ============================================================================

/// Produces one evaluated child from two parents.
///
/// The child inherits a contiguous segment of `parent1` at the same
/// positions; the other positions are filled, left to right, with the
/// remaining cities in `parent2`'s order. With probability `mutation_rate`
/// two distinct positions of the child are then swapped.
///
/// # Errors
///
/// - [`GaError::ParentMismatch`] if the parents visit different city sets.
/// - [`GaError::EmptyInstance`] if the parents are empty.
/// - Any error from [`Tour::evaluate`].
pub fn crossover<D: DistanceProvider + ?Sized, R: Rng>(
    parent1: &Tour,
    parent2: &Tour,
    mutation_rate: f64,
    provider: &D,
    rng: &mut R,
) -> Result<Tour, GaError> {
    let mut child = breed(parent1, parent2, mutation_rate, rng)?;
    child.evaluate(provider)?;
    Ok(child)
}

/// Unevaluated variant of [`crossover`], used when the caller evaluates a
/// whole population at once.
pub(crate) fn breed<R: Rng>(
    parent1: &Tour,
    parent2: &Tour,
    mutation_rate: f64,
    rng: &mut R,
) -> Result<Tour, GaError> {
    // Both parents are permutations of 0..len, so equal lengths imply the
    // same city set.
    if parent1.len() != parent2.len() {
        return Err(GaError::ParentMismatch {
            left: parent1.len(),
            right: parent2.len(),
        });
    }
    if parent1.is_empty() {
        return Err(GaError::EmptyInstance);
    }

    let (start, end) = crossover_segment(parent1.len(), rng);
    let mut cities = order_crossover(parent1.cities(), parent2.cities(), start, end);

    if probability(rng) < mutation_rate {
        swap_mutation(&mut cities, rng);
    }

    Ok(Tour::from_permutation(cities))
}

/// Draws the inherited segment `[start, end)` for a tour of `n > 0` cities.
///
/// For `n > 3` the segment length is kept in `[2, n - 2]`: `end` is redrawn
/// until `|end - start| >= 2` and `|end - start| != n - 1`.
pub(crate) fn crossover_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let start = rng.random_range(0..n);
    let mut end = rng.random_range(0..n);

    if n > 3 {
        while start.abs_diff(end) < 2 || start.abs_diff(end) == n - 1 {
            end = rng.random_range(0..n);
        }
    }

    if start > end {
        (end, start)
    } else {
        (start, end)
    }
}

/// Order Crossover (OX) over the segment `[start, end)`.
///
/// # Panics
/// Panics if the parents differ in length or `start..end` is out of range.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::operators::order_crossover;
///
/// let child = order_crossover(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], 1, 3);
/// assert_eq!(child, vec![4, 1, 2, 3, 0]);
/// ```
pub fn order_crossover(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(start <= end && end <= n, "segment out of range");

    let mut child = vec![usize::MAX; n];
    let mut inherited = vec![false; n];

    for i in start..end {
        child[i] = parent1[i];
        inherited[parent1[i]] = true;
    }

    let donor = parent2.iter().copied().filter(|&city| !inherited[city]);
    for (pos, city) in (0..start).chain(end..n).zip(donor) {
        child[pos] = city;
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swaps two distinct, uniformly drawn positions.
///
/// Both positions are redrawn until they differ. Tours shorter than two
/// cities are left unchanged.
pub fn swap_mutation<R: Rng>(cities: &mut [usize], rng: &mut R) {
    let n = cities.len();
    if n < 2 {
        return;
    }

    let (mut a, mut b) = (0, 0);
    while a == b {
        a = rng.random_range(0..n);
        b = rng.random_range(0..n);
    }
    cities.swap(a, b);
}

// ============================================================================
// Tests
// ============================================================================
