//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the search through three phases:
//! initialization → evolution (one generation per iteration) → convergence.
//!
//! Each generation: copy the elite (if enabled), fill the remaining slots
//! with crossover offspring of roulette-selected parents, evaluate, and
//! compare the new best fitness with the previous one. The search stops once
//! the best fitness has stayed exactly the same for
//! [`stagnation_threshold`](GaConfig::stagnation_threshold) consecutive
//! generations.

use super::config::GaConfig;
use super::error::GaError;
use super::operators::breed;
use super::population::Population;
use super::selection::roulette_without_replacement;
use super::types::Tour;
use crate::distance::DistanceProvider;
use crate::random::create_rng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Lifecycle phase of a GA run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaPhase {
    /// Building and evaluating the random initial population.
    Initializing,
    /// Producing generations.
    Evolving,
    /// Stop condition reached; the final population is returned.
    Converged,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Fittest tour of the final population.
    pub best: Tour,

    /// The final population.
    pub population: Population,

    /// Number of generations executed after initialization.
    pub generations: usize,

    /// Whether the run stopped on the stagnation threshold.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best distance of the initial population, then of each generation.
    pub distance_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tsp::distance::{DistanceMatrix, Metric};
/// use u_tsp::ga::{GaConfig, GaRunner};
///
/// let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
/// let matrix = DistanceMatrix::from_coordinates(&points, Metric::Euclidean);
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_stagnation_threshold(50)
///     .with_seed(42);
///
/// let result = GaRunner::run(&matrix, &config).unwrap();
/// assert!(result.best.distance() >= 3.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns the first [`GaError`] raised; no partial result is produced.
    pub fn run<D: DistanceProvider + ?Sized>(
        provider: &D,
        config: &GaConfig,
    ) -> Result<GaResult, GaError> {
        Self::run_with_cancel(provider, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops at
    /// the next generation boundary and returns the current population.
    #[instrument(
        level = "info",
        skip(provider, config, cancel),
        fields(
            cities = provider.city_count(),
            population_size = config.population_size,
            elitism = config.elitism,
            mutation_rate = config.mutation_rate,
            stagnation_threshold = config.stagnation_threshold,
        )
    )]
    pub fn run_with_cancel<D: DistanceProvider + ?Sized>(
        provider: &D,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, GaError> {
        config.validate().map_err(GaError::InvalidConfig)?;
        if provider.city_count() == 0 {
            return Err(GaError::EmptyInstance);
        }

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        // 1. Initialize population
        info!(phase = ?GaPhase::Initializing, "building initial population");
        let mut population =
            Population::random(provider, config.population_size, config.parallel, &mut rng)?;
        let mut best_fitness = fittest(&population)?.fitness();

        let mut distance_history = vec![fittest(&population)?.distance()];
        let mut repeated_fitness = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        // 2. Evolutionary loop
        info!(
            phase = ?GaPhase::Evolving,
            best_distance = distance_history[0],
            "evolving"
        );
        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if config.max_generations.is_some_and(|max| generations >= max) {
                break;
            }

            let next = next_generation(&population, provider, config, &mut rng)?;
            let next_best = fittest(&next)?;

            if next_best.fitness() != best_fitness {
                repeated_fitness = 0;
            } else {
                repeated_fitness += 1;
            }
            best_fitness = next_best.fitness();
            distance_history.push(next_best.distance());

            population = next;
            generations += 1;

            debug!(
                generation = generations,
                best_distance = distance_history[generations],
                repeated_fitness,
                "generation complete"
            );

            if repeated_fitness >= config.stagnation_threshold {
                stagnated = true;
                break;
            }
        }

        let best = fittest(&population)?.clone();
        info!(
            phase = ?GaPhase::Converged,
            generations,
            stagnated,
            cancelled,
            best_distance = best.distance(),
            "search finished"
        );

        Ok(GaResult {
            best,
            population,
            generations,
            stagnated,
            cancelled,
            distance_history,
        })
    }
}

/// Breeds and evaluates the generation that follows `current`.
fn next_generation<D: DistanceProvider + ?Sized, R: Rng>(
    current: &Population,
    provider: &D,
    config: &GaConfig,
    rng: &mut R,
) -> Result<Population, GaError> {
    let size = current.len();
    let tours = current.tours();
    let mut next = Population::with_capacity(size);

    if config.elitism {
        next.push(fittest(current)?.clone());
    }

    while next.len() < size {
        let parents = roulette_without_replacement(tours, 2, rng)?;
        let child = breed(&tours[parents[0]], &tours[parents[1]], config.mutation_rate, rng)?;
        next.push(child);
    }

    next.evaluate(provider, config.parallel)?;
    Ok(next)
}

fn fittest(population: &Population) -> Result<&Tour, GaError> {
    population.fittest().ok_or(GaError::EmptyPopulation)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMatrix, Metric};
    use crate::ga::types::is_permutation;

    fn unit_square() -> DistanceMatrix {
        let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
        DistanceMatrix::from_coordinates(&points, Metric::Euclidean)
    }

    /// Deterministic pseudo-random cloud of `n` points in a 100×100 box.
    fn scattered(n: usize) -> DistanceMatrix {
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let x = ((i * 7919) % 101) as f64;
                let y = ((i * 104_729 + 13) % 97) as f64;
                (x, y)
            })
            .collect();
        DistanceMatrix::from_coordinates(&points, Metric::Euc2d)
    }

    #[test]
    fn test_unit_square_converges_to_perimeter() {
        let m = unit_square();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_mutation_rate(0.05)
            .with_stagnation_threshold(50)
            .with_elitism(true)
            .with_seed(42);

        let result = GaRunner::run(&m, &config).unwrap();

        assert!(result.stagnated);
        assert!(
            (result.best.distance() - 3.0).abs() < 1e-9,
            "expected open perimeter path of length 3, got {}",
            result.best.distance()
        );
        assert!(result.generations >= 50);
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let m = scattered(15);
        let config = GaConfig::default()
            .with_population_size(16)
            .with_mutation_rate(0.1)
            .with_stagnation_threshold(20)
            .with_seed(1234);

        let a = GaRunner::run(&m, &config).unwrap();
        let b = GaRunner::run(&m, &config).unwrap();

        assert_eq!(a.generations, b.generations);
        assert_eq!(a.distance_history, b.distance_history);
        assert_eq!(a.best, b.best);
        assert_eq!(a.population.tours(), b.population.tours());
    }

    #[test]
    fn test_parallel_flag_does_not_change_result() {
        let m = scattered(12);
        let config = GaConfig::default()
            .with_population_size(12)
            .with_stagnation_threshold(15)
            .with_seed(77);

        let sequential = GaRunner::run(&m, &config).unwrap();
        let parallel = GaRunner::run(&m, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(sequential.best, parallel.best);
        assert_eq!(sequential.distance_history, parallel.distance_history);
    }

    #[test]
    fn test_elitism_is_monotone() {
        let m = scattered(20);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_mutation_rate(0.2)
            .with_stagnation_threshold(30)
            .with_seed(42);

        let result = GaRunner::run(&m, &config).unwrap();

        for window in result.distance_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best distance should never increase with elitism: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_zero_threshold_stops_after_one_generation() {
        let m = scattered(10);
        for elitism in [true, false] {
            let config = GaConfig::default()
                .with_population_size(8)
                .with_elitism(elitism)
                .with_stagnation_threshold(0)
                .with_seed(3);

            let result = GaRunner::run(&m, &config).unwrap();
            assert_eq!(result.generations, 1);
            assert_eq!(result.distance_history.len(), 2);
            assert!(result.stagnated);
        }
    }

    #[test]
    fn test_single_member_population() {
        let m = scattered(6);
        let config = GaConfig::default()
            .with_population_size(1)
            .with_elitism(false)
            .with_mutation_rate(0.2)
            .with_stagnation_threshold(10)
            .with_seed(5);

        let result = GaRunner::run(&m, &config).unwrap();
        assert_eq!(result.population.len(), 1);
        assert!(is_permutation(result.best.cities()));
        assert_eq!(result.population.fittest(), Some(&result.best));
    }

    #[test]
    fn test_single_member_with_elitism_never_changes() {
        let m = scattered(6);
        let config = GaConfig::default()
            .with_population_size(1)
            .with_stagnation_threshold(5)
            .with_seed(5);

        let result = GaRunner::run(&m, &config).unwrap();
        assert_eq!(result.generations, 5);
        assert!(result
            .distance_history
            .iter()
            .all(|&d| d == result.distance_history[0]));
    }

    #[test]
    fn test_final_population_keeps_size_and_permutations() {
        let m = scattered(9);
        let config = GaConfig::default()
            .with_population_size(11)
            .with_elitism(false)
            .with_stagnation_threshold(5)
            .with_seed(8);

        let result = GaRunner::run(&m, &config).unwrap();
        assert_eq!(result.population.len(), 11);
        for tour in result.population.tours() {
            assert!(is_permutation(tour.cities()));
            assert_eq!(tour.len(), 9);
        }
        let max = result
            .population
            .tours()
            .iter()
            .map(Tour::fitness)
            .fold(0.0, f64::max);
        assert_eq!(result.best.fitness(), max);
    }

    #[test]
    fn test_max_generations_bound() {
        let m = scattered(25);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_stagnation_threshold(usize::MAX)
            .with_max_generations(7)
            .with_seed(1);

        let result = GaRunner::run(&m, &config).unwrap();
        assert_eq!(result.generations, 7);
        assert!(!result.stagnated);
        assert_eq!(result.distance_history.len(), 8);
    }

    #[test]
    fn test_cancellation_before_first_generation() {
        let m = scattered(10);
        let config = GaConfig::default().with_seed(2);
        let cancel = Arc::new(AtomicBool::new(true));

        let result = GaRunner::run_with_cancel(&m, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.population.len(), config.population_size);
    }

    #[test]
    fn test_fatal_errors() {
        let config = GaConfig::default().with_seed(1);

        assert_eq!(
            GaRunner::run(&DistanceMatrix::zeros(0), &config).unwrap_err(),
            GaError::EmptyInstance
        );
        assert_eq!(
            GaRunner::run(&DistanceMatrix::zeros(1), &config).unwrap_err(),
            GaError::DegenerateDistance
        );
        assert!(matches!(
            GaRunner::run(&unit_square(), &config.clone().with_population_size(0)),
            Err(GaError::InvalidConfig(_))
        ));
    }
}
