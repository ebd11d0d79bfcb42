//! Parent selection.
//!
//! Fitness-proportionate (roulette wheel) sampling **without replacement**:
//! each draw builds a fresh cumulative distribution over the individuals not
//! yet chosen, so every draw's probabilities are proportional to the
//! remaining fitness mass.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::error::GaError;
use super::types::Tour;
use crate::random::probability;
use rand::Rng;

/// Selects `k` distinct slot indices from `population`, proportionally to
/// fitness (higher fitness = more likely).
///
/// A single-member population cannot satisfy "distinct" for `k > 1`; its
/// only slot is returned `k` times.
///
/// If the remaining fitness mass is not positive (unevaluated tours), the
/// draw falls back to a uniform pick among the remaining slots.
///
/// # Errors
///
/// - [`GaError::EmptyPopulation`] if `population` is empty and `k > 0`.
/// - [`GaError::SelectionOverflow`] if `k` exceeds the population size
///   (for populations of two or more).
///
/// # Complexity
/// O(k·n)
pub fn roulette_without_replacement<R: Rng>(
    population: &[Tour],
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>, GaError> {
    let n = population.len();
    if k == 0 {
        return Ok(Vec::new());
    }
    if n == 0 {
        return Err(GaError::EmptyPopulation);
    }
    if n == 1 {
        return Ok(vec![0; k]);
    }
    if k > n {
        return Err(GaError::SelectionOverflow {
            requested: k,
            available: n,
        });
    }

    let mut chosen = vec![false; n];
    let mut selected = Vec::with_capacity(k);

    while selected.len() < k {
        let pick = spin(population, &chosen, rng);
        chosen[pick] = true;
        selected.push(pick);
    }

    Ok(selected)
}

/// One roulette draw over the slots not yet marked in `chosen`.
///
/// At least one slot must be unchosen.
fn spin<R: Rng>(population: &[Tour], chosen: &[bool], rng: &mut R) -> usize {
    let remaining: Vec<usize> = (0..population.len()).filter(|&i| !chosen[i]).collect();
    let total: f64 = remaining.iter().map(|&i| population[i].fitness()).sum();

    if !(total > 0.0 && total.is_finite()) {
        return remaining[rng.random_range(0..remaining.len())];
    }

    let threshold = probability(rng);
    let mut cumulative = 0.0;
    for &i in &remaining {
        cumulative += population[i].fitness() / total;
        if cumulative > threshold {
            return i;
        }
    }

    // Rounding can leave the last cumulative value just below the threshold.
    remaining[remaining.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::random::create_rng;
    use std::collections::HashSet;

    /// Tours over two cities whose distances are exactly `distances`.
    fn population(distances: &[f64]) -> Vec<Tour> {
        distances
            .iter()
            .map(|&d| {
                let m = DistanceMatrix::from_rows(vec![vec![0.0, d], vec![d, 0.0]]).unwrap();
                Tour::evaluated(vec![0, 1], &m).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_full_draw_returns_distinct_slots() {
        let pop = population(&[4.0, 1.0, 2.0, 8.0, 3.0, 3.0]);
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let picks = roulette_without_replacement(&pop, pop.len(), &mut rng).unwrap();
            assert_eq!(picks.len(), pop.len());
            let unique: HashSet<usize> = picks.iter().copied().collect();
            assert_eq!(unique.len(), pop.len(), "repeated slot in {picks:?}");
        }
    }

    #[test]
    fn test_pair_is_distinct() {
        let pop = population(&[1.0, 1.0]);
        let mut rng = create_rng(0);
        for _ in 0..100 {
            let picks = roulette_without_replacement(&pop, 2, &mut rng).unwrap();
            assert_ne!(picks[0], picks[1]);
        }
    }

    #[test]
    fn test_favors_fitter_tours() {
        // Fitness 1.0, 0.1, 0.5: first draw should follow roughly 10 : 1 : 5.
        let pop = population(&[1.0, 10.0, 2.0]);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 3];
        let n = 16000;
        for _ in 0..n {
            let picks = roulette_without_replacement(&pop, 1, &mut rng).unwrap();
            counts[picks[0]] += 1;
        }
        assert!(counts[0] > counts[2] && counts[2] > counts[1], "{counts:?}");
        let share = counts[0] as f64 / n as f64;
        assert!((share - 10.0 / 16.0).abs() < 0.03, "share of best = {share}");
    }

    #[test]
    fn test_second_draw_renormalizes_over_remaining() {
        // After slot 0 is taken, slots 1 and 2 share fitness 0.1 : 0.5.
        let pop = population(&[0.001, 10.0, 2.0]);
        let mut rng = create_rng(11);
        let mut second = [0u32; 3];
        let mut trials = 0u32;
        for _ in 0..20000 {
            let picks = roulette_without_replacement(&pop, 2, &mut rng).unwrap();
            if picks[0] == 0 {
                second[picks[1]] += 1;
                trials += 1;
            }
        }
        assert_eq!(second[0], 0);
        let share = second[2] as f64 / trials as f64;
        assert!((share - 5.0 / 6.0).abs() < 0.03, "share = {share}");
    }

    #[test]
    fn test_single_member_repeats() {
        let pop = population(&[5.0]);
        let mut rng = create_rng(42);
        assert_eq!(
            roulette_without_replacement(&pop, 2, &mut rng).unwrap(),
            vec![0, 0]
        );
    }

    #[test]
    fn test_overflow_is_rejected() {
        let pop = population(&[1.0, 2.0]);
        let mut rng = create_rng(42);
        assert_eq!(
            roulette_without_replacement(&pop, 3, &mut rng),
            Err(GaError::SelectionOverflow {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_empty_population_is_rejected() {
        let mut rng = create_rng(42);
        assert_eq!(
            roulette_without_replacement(&[], 2, &mut rng),
            Err(GaError::EmptyPopulation)
        );
        assert_eq!(roulette_without_replacement(&[], 0, &mut rng), Ok(vec![]));
    }

    #[test]
    fn test_unevaluated_tours_fall_back_to_uniform() {
        let pop = vec![
            Tour::new(vec![0, 1]).unwrap(),
            Tour::new(vec![1, 0]).unwrap(),
            Tour::new(vec![0, 1]).unwrap(),
        ];
        let mut rng = create_rng(42);
        let picks = roulette_without_replacement(&pop, 3, &mut rng).unwrap();
        let unique: HashSet<usize> = picks.into_iter().collect();
        assert_eq!(unique.len(), 3);
    }
}
