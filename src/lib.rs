//! Genetic-algorithm solver for the Traveling Salesman Problem.
//!
//! Evolves a population of candidate tours through fitness-proportionate
//! selection, Order Crossover and swap mutation until the best tour stops
//! improving:
//!
//! - **GA engine** ([`ga`]): tours, population, selection, operators and
//!   the generational loop with stagnation-based termination.
//! - **Distances** ([`distance`]): the read-only cost lookup the engine
//!   consumes, with TSPLIB coordinate metrics.
//! - **TSPLIB I/O** ([`tsplib`]): instance parsing and tour output.
//! - **Randomness** ([`random`]): seeded generators threaded explicitly
//!   through every stochastic operation.
//!
//! # Example
//!
//! ```
//! use u_tsp::distance::{DistanceMatrix, Metric};
//! use u_tsp::ga::{GaConfig, GaRunner};
//!
//! let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.5, 2.0)];
//! let matrix = DistanceMatrix::from_coordinates(&points, Metric::Euclidean);
//!
//! let config = GaConfig::default()
//!     .with_population_size(30)
//!     .with_stagnation_threshold(40)
//!     .with_seed(42);
//! let result = GaRunner::run(&matrix, &config).unwrap();
//!
//! assert_eq!(result.best.len(), 5);
//! ```
//!
//! Tour length is measured as an open path: the edge from the last city
//! back to the first is not counted.

pub mod distance;
pub mod ga;
pub mod random;
pub mod tsplib;
