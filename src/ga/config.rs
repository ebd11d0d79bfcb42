//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.stagnation_threshold, 200);
/// assert!(config.elitism);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_mutation_rate(0.05)
///     .with_stagnation_threshold(100)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in every generation. Must be at least 1.
    pub population_size: usize,

    /// Whether the fittest tour is copied unchanged into the next generation.
    pub elitism: bool,

    /// Probability of a swap mutation on each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Consecutive generations with unchanged best fitness before stopping.
    ///
    /// The check runs after every generation, so `0` stops after exactly one.
    pub stagnation_threshold: usize,

    /// Optional hard bound on the number of generations.
    ///
    /// `None` (the default) relies on the stagnation threshold alone.
    pub max_generations: Option<usize>,

    /// Whether to evaluate tours in parallel.
    ///
    /// Only effective with the `parallel` cargo feature. Results are
    /// identical to sequential evaluation.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            elitism: true,
            mutation_rate: 0.02,
            stagnation_threshold: 200,
            max_generations: None,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation threshold.
    pub fn with_stagnation_threshold(mut self, generations: usize) -> Self {
        self.stagnation_threshold = generations;
        self
    }

    /// Sets a hard bound on the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        if self.max_generations == Some(0) {
            return Err("max_generations must be positive or None".into());
        }
        Ok(())
    }
}
