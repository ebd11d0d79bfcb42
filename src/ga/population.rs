//! Population of tours.
//!
//! A [`Population`] owns its tours and remembers which slot holds the
//! fittest one. It is rebuilt from scratch every generation; the previous
//! generation is dropped once its successor has been evaluated.

use super::error::GaError;
use super::operators::random_permutation;
use super::types::Tour;
use crate::distance::DistanceProvider;
use rand::Rng;

/// A fixed-capacity collection of tours.
#[derive(Debug, Clone, Default)]
pub struct Population {
    tours: Vec<Tour>,
    fittest: Option<usize>,
}

impl Population {
    /// Creates an empty population with room for `capacity` tours.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tours: Vec::with_capacity(capacity),
            fittest: None,
        }
    }

    /// Wraps existing tours without evaluating them.
    pub fn from_tours(tours: Vec<Tour>) -> Self {
        Self {
            tours,
            fittest: None,
        }
    }

    /// Creates `size` uniformly random tours over the provider's cities and
    /// evaluates them.
    pub fn random<D: DistanceProvider + ?Sized, R: Rng>(
        provider: &D,
        size: usize,
        parallel: bool,
        rng: &mut R,
    ) -> Result<Self, GaError> {
        let n = provider.city_count();
        let mut population = Self::with_capacity(size);
        for _ in 0..size {
            population.push(Tour::from_permutation(random_permutation(n, rng)));
        }
        population.evaluate(provider, parallel)?;
        Ok(population)
    }

    /// Appends a tour. The fittest slot is left untouched until the next
    /// [`evaluate`](Self::evaluate) or [`refresh_fittest`](Self::refresh_fittest).
    pub fn push(&mut self, tour: Tour) {
        self.tours.push(tour);
    }

    /// Recomputes every tour's distance and fitness, then the fittest slot.
    ///
    /// With `parallel` set and the `parallel` feature enabled, tours are
    /// evaluated concurrently with rayon. The outcome is identical either way.
    pub fn evaluate<D: DistanceProvider + ?Sized>(
        &mut self,
        provider: &D,
        parallel: bool,
    ) -> Result<(), GaError> {
        evaluate_tours(&mut self.tours, provider, parallel)?;
        self.refresh_fittest();
        Ok(())
    }

    /// Points the fittest slot at the highest-fitness tour.
    ///
    /// Ties go to the lowest slot index. Returns the new slot, or `None` for
    /// an empty population.
    pub fn refresh_fittest(&mut self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, tour) in self.tours.iter().enumerate() {
            match best {
                Some(b) if tour.fitness() <= self.tours[b].fitness() => {}
                _ => best = Some(i),
            }
        }
        self.fittest = best;
        best
    }

    /// The fittest tour, once the population has been evaluated.
    pub fn fittest(&self) -> Option<&Tour> {
        self.fittest.map(|i| &self.tours[i])
    }

    /// Slot index of the fittest tour.
    pub fn fittest_index(&self) -> Option<usize> {
        self.fittest
    }

    /// All tours in slot order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Whether the population holds no tours.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

#[cfg(feature = "parallel")]
fn evaluate_tours<D: DistanceProvider + ?Sized>(
    tours: &mut [Tour],
    provider: &D,
    parallel: bool,
) -> Result<(), GaError> {
    use rayon::prelude::*;

    if parallel {
        tours
            .par_iter_mut()
            .try_for_each(|tour| tour.evaluate(provider))
    } else {
        tours.iter_mut().try_for_each(|tour| tour.evaluate(provider))
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_tours<D: DistanceProvider + ?Sized>(
    tours: &mut [Tour],
    provider: &D,
    _parallel: bool,
) -> Result<(), GaError> {
    tours.iter_mut().try_for_each(|tour| tour.evaluate(provider))
}
