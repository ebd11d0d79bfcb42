//! Distance providers.
//!
//! The GA engine only needs a read-only cost lookup between city indices.
//! [`DistanceProvider`] is that seam; [`DistanceMatrix`] is the dense
//! implementation built from a TSPLIB instance, either from an explicit
//! weight table or from coordinates under a [`Metric`].

mod metric;

pub use metric::Metric;

/// Read-only cost lookup between 0-based city indices.
///
/// Costs are non-negative and may be asymmetric. `cost(i, i)` is `0.0` by
/// convention and never traversed by a tour.
///
/// `Send + Sync` because the `parallel` feature evaluates tours of a
/// population concurrently against a shared provider.
pub trait DistanceProvider: Send + Sync {
    /// Number of cities. Valid indices are `0..city_count()`.
    fn city_count(&self) -> usize;

    /// Cost of travelling from city `from` to city `to`.
    fn cost(&self, from: usize, to: usize) -> f64;
}

/// Dense square cost table stored row-major.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::{DistanceMatrix, DistanceProvider};
///
/// let m = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0],
///     vec![3.0, 0.0],
/// ]).unwrap();
/// assert_eq!(m.city_count(), 2);
/// assert_eq!(m.cost(1, 0), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    costs: Vec<f64>,
}

impl DistanceMatrix {
    /// Creates an all-zero `size × size` matrix.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            costs: vec![0.0; size * size],
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// Returns `None` if the rows are not square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            costs: rows.into_iter().flatten().collect(),
        })
    }

    /// Builds a matrix from planar coordinates under `metric`.
    ///
    /// The diagonal is always zero, whatever the metric yields for a point
    /// against itself.
    pub fn from_coordinates(points: &[(f64, f64)], metric: Metric) -> Self {
        let size = points.len();
        let mut matrix = Self::zeros(size);
        for (i, &a) in points.iter().enumerate() {
            for (j, &b) in points.iter().enumerate() {
                if i != j {
                    matrix.set(i, j, metric.distance(a, b));
                }
            }
        }
        matrix
    }

    /// Sets the cost from `from` to `to`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        assert!(from < self.size && to < self.size, "index out of range");
        self.costs[from * self.size + to] = cost;
    }

    /// Returns the cost from `from` to `to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.costs[from * self.size + to]
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `cost(i, j) == cost(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

impl DistanceProvider for DistanceMatrix {
    fn city_count(&self) -> usize {
        self.size
    }

    fn cost(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_none());
    }

    #[test]
    fn test_from_rows_layout() {
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 6.0, 0.0],
        ])
        .unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.get(0, 2), 2.0);
        assert_eq!(m.get(2, 1), 6.0);
        assert!(!m.is_symmetric());
    }

    #[test]
    fn test_from_coordinates_unit_square() {
        let points = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
        let m = DistanceMatrix::from_coordinates(&points, Metric::Euclidean);
        assert_eq!(m.cost(0, 1), 1.0);
        assert_eq!(m.cost(1, 2), 1.0);
        assert!((m.cost(0, 2) - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(m.cost(3, 3), 0.0);
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_set_and_get() {
        let mut m = DistanceMatrix::zeros(2);
        m.set(0, 1, 7.5);
        assert_eq!(m.cost(0, 1), 7.5);
        assert_eq!(m.cost(1, 0), 0.0);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_set_out_of_range_panics() {
        let mut m = DistanceMatrix::zeros(2);
        m.set(2, 0, 1.0);
    }
}
