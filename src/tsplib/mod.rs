//! TSPLIB instance and tour files.
//!
//! Supported instances:
//!
//! - `EDGE_WEIGHT_TYPE`: `EUC_2D`, `CEIL_2D`, `ATT`, `GEO` (from a
//!   `NODE_COORD_SECTION`) and `EXPLICIT`
//! - `EDGE_WEIGHT_FORMAT` (explicit only): `FULL_MATRIX`, `UPPER_ROW`,
//!   `LOWER_ROW`, `UPPER_DIAG_ROW`, `LOWER_DIAG_ROW`
//!
//! Tours are written in the TSPLIB `TOUR` format with an extra `DISTANCE`
//! header line.
//!
//! # References
//!
//! - Reinelt (1995), "TSPLIB 95"

mod parser;
mod writer;

pub use parser::{parse, read};
pub use writer::{format_plot, format_tour, write_tour};

use crate::distance::{DistanceMatrix, DistanceProvider};

/// A city as listed in the instance file.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Identifier from the file (1-based for TSPLIB instances).
    pub id: usize,
    /// Planar coordinates, absent for explicit-matrix instances.
    pub position: Option<(f64, f64)>,
}

/// A parsed problem instance.
///
/// Cities are addressed internally by their 0-based position in
/// [`cities`](Self::cities); the instance delegates cost lookups to its
/// distance matrix.
#[derive(Debug, Clone)]
pub struct Instance {
    /// `NAME` header.
    pub name: String,
    /// `EDGE_WEIGHT_TYPE` header, verbatim.
    pub edge_weight_type: String,
    /// Cities in file order.
    pub cities: Vec<City>,
    /// Cost between every pair of cities.
    pub matrix: DistanceMatrix,
}

impl DistanceProvider for Instance {
    fn city_count(&self) -> usize {
        self.matrix.size()
    }

    fn cost(&self, from: usize, to: usize) -> f64 {
        self.matrix.get(from, to)
    }
}

/// Errors raised while reading or writing TSPLIB files.
#[derive(Debug, thiserror::Error)]
pub enum TsplibError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing header field {0}")]
    MissingField(&'static str),

    #[error("line {line}: invalid {what}: {value:?}")]
    InvalidValue {
        line: usize,
        what: &'static str,
        value: String,
    },

    #[error("unsupported EDGE_WEIGHT_TYPE {0}")]
    UnsupportedWeightType(String),

    #[error("unsupported EDGE_WEIGHT_FORMAT {0}")]
    UnsupportedWeightFormat(String),

    #[error("missing section {0}")]
    MissingSection(&'static str),

    #[error("{section} ended after {found} of {expected} entries")]
    Truncated {
        section: &'static str,
        expected: usize,
        found: usize,
    },
}
