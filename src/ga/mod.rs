//! Genetic Algorithm for the Traveling Salesman Problem.
//!
//! Candidate solutions are [`Tour`]s: permutations of the city indices of a
//! [`DistanceProvider`](crate::distance::DistanceProvider), scored by the
//! reciprocal of their open-path length. [`GaRunner`] evolves a
//! [`Population`] of tours until the best fitness stops changing.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, elitism, rates)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final population, best tour and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Random tours, Order Crossover and swap mutation
//! - [`selection`]: Roulette-wheel selection without replacement
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
mod error;
pub mod operators;
mod population;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use error::GaError;
pub use population::Population;
pub use runner::{GaPhase, GaResult, GaRunner};
pub use types::{is_permutation, path_distance, Tour};
