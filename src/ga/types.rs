//! Tour representation and fitness evaluation.
//!
//! A [`Tour`] is a permutation of city indices `0..n` together with its
//! cached total distance and fitness. The distance is the sum of the edges
//! between consecutive positions; the closing edge back to the first city
//! is not included, so the engine minimizes the length of a Hamiltonian
//! path.

use super::error::GaError;
use crate::distance::DistanceProvider;

/// A candidate solution: every city visited exactly once.
///
/// Freshly built tours are unevaluated (`distance = +inf`, `fitness = 0`)
/// until [`evaluate`](Tour::evaluate) runs against a distance provider.
///
/// Deserialization goes through [`Tour::new`]: only `cities` is read, and the
/// result is unevaluated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TourRepr")
)]
pub struct Tour {
    cities: Vec<usize>,
    distance: f64,
    fitness: f64,
}

/// Wire form of a [`Tour`]; cached values are recomputed, never trusted.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TourRepr {
    cities: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<TourRepr> for Tour {
    type Error = GaError;

    fn try_from(repr: TourRepr) -> Result<Self, Self::Error> {
        Tour::new(repr.cities)
    }
}

impl Tour {
    /// Wraps a city sequence, checking that it is a permutation of `0..len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::ga::Tour;
    ///
    /// assert!(Tour::new(vec![2, 0, 1]).is_ok());
    /// assert!(Tour::new(vec![0, 0, 1]).is_err());
    /// ```
    pub fn new(cities: Vec<usize>) -> Result<Self, GaError> {
        if !is_permutation(&cities) {
            return Err(GaError::NotAPermutation { len: cities.len() });
        }
        Ok(Self::from_permutation(cities))
    }

    /// Wraps a sequence the caller already knows to be a permutation.
    pub(crate) fn from_permutation(cities: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&cities), "not a permutation: {cities:?}");
        Self {
            cities,
            distance: f64::INFINITY,
            fitness: 0.0,
        }
    }

    /// Builds and evaluates a tour in one step.
    pub fn evaluated<D: DistanceProvider + ?Sized>(
        cities: Vec<usize>,
        provider: &D,
    ) -> Result<Self, GaError> {
        let mut tour = Self::new(cities)?;
        tour.evaluate(provider)?;
        Ok(tour)
    }

    /// Recomputes distance and fitness from the current sequence.
    ///
    /// # Errors
    ///
    /// - [`GaError::UniverseMismatch`] if the tour length differs from the
    ///   provider's city count.
    /// - [`GaError::DegenerateDistance`] if the total distance is zero
    ///   (single city, or all traversed edges cost nothing).
    pub fn evaluate<D: DistanceProvider + ?Sized>(&mut self, provider: &D) -> Result<(), GaError> {
        if self.cities.len() != provider.city_count() {
            return Err(GaError::UniverseMismatch {
                tour: self.cities.len(),
                provider: provider.city_count(),
            });
        }

        let distance = path_distance(&self.cities, provider);
        if distance <= 0.0 {
            return Err(GaError::DegenerateDistance);
        }

        self.distance = distance;
        self.fitness = 1.0 / distance;
        Ok(())
    }

    /// City indices in visiting order.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Total open-path distance; `+inf` before evaluation.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// `1 / distance`; `0` before evaluation. Higher is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the tour has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// Sum of `cost(cities[i], cities[i - 1])` for `i` in `1..len`.
///
/// The edge from the last city back to the first is not counted.
pub fn path_distance<D: DistanceProvider + ?Sized>(cities: &[usize], provider: &D) -> f64 {
    cities
        .windows(2)
        .map(|edge| provider.cost(edge[1], edge[0]))
        .sum()
}

/// Whether `values` contains each of `0..values.len()` exactly once.
pub fn is_permutation(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    for &v in values {
        if v >= seen.len() || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}
