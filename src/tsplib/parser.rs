//! TSPLIB instance parser.

use super::{City, Instance, TsplibError};
use crate::distance::{DistanceMatrix, Metric};
use std::collections::HashSet;
use std::iter::Peekable;
use std::path::Path;
use tracing::debug;

/// Upper bound on entries reserved up front from the `DIMENSION` header.
const MAX_RESERVE: usize = 4096;

/// Reads and parses the instance file at `path`.
pub fn read(path: impl AsRef<Path>) -> Result<Instance, TsplibError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Parses the text of a TSPLIB instance.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceProvider;
///
/// let instance = u_tsp::tsplib::parse(
///     "NAME: tiny\n\
///      TYPE: TSP\n\
///      DIMENSION: 3\n\
///      EDGE_WEIGHT_TYPE: EUC_2D\n\
///      NODE_COORD_SECTION\n\
///      1 0 0\n\
///      2 3 4\n\
///      3 6 8\n\
///      EOF\n",
/// ).unwrap();
///
/// assert_eq!(instance.name, "tiny");
/// assert_eq!(instance.cost(0, 1), 5.0);
/// ```
pub fn parse(text: &str) -> Result<Instance, TsplibError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    let mut header = Header::default();
    let mut cities: Option<Vec<City>> = None;
    let mut weights: Option<Vec<f64>> = None;

    while let Some((line_no, line)) = lines.next() {
        match line {
            "EOF" => break,
            "NODE_COORD_SECTION" => {
                let dimension = header.dimension()?;
                cities = Some(read_coordinates(&mut lines, dimension)?);
            }
            "EDGE_WEIGHT_SECTION" => {
                let dimension = header.dimension()?;
                let expected = header
                    .weight_format()?
                    .entry_count(dimension)
                    .ok_or_else(|| header.invalid_dimension())?;
                weights = Some(read_weights(&mut lines, expected)?);
            }
            _ if line.ends_with("_SECTION") => {
                debug!(section = line, "skipping unsupported section");
                while lines.next_if(|(_, l)| starts_numeric(l)).is_some() {}
            }
            _ => header.set(line_no, line)?,
        }
    }

    let dimension = header.dimension()?;
    let name = header.name.clone().unwrap_or_default();
    let edge_weight_type = header
        .edge_weight_type
        .clone()
        .ok_or(TsplibError::MissingField("EDGE_WEIGHT_TYPE"))?;

    let (cities, matrix) = if edge_weight_type == "EXPLICIT" {
        let weights = weights.ok_or(TsplibError::MissingSection("EDGE_WEIGHT_SECTION"))?;
        let matrix = header.weight_format()?.build(&weights, dimension);
        let cities = cities.unwrap_or_else(|| {
            (1..=dimension)
                .map(|id| City { id, position: None })
                .collect()
        });
        (cities, matrix)
    } else {
        let metric = metric_for(&edge_weight_type)?;
        let cities = cities.ok_or(TsplibError::MissingSection("NODE_COORD_SECTION"))?;
        let points: Vec<(f64, f64)> = cities
            .iter()
            .map(|c| c.position.unwrap_or_default())
            .collect();
        (cities, DistanceMatrix::from_coordinates(&points, metric))
    };

    debug!(name = %name, dimension, edge_weight_type = %edge_weight_type, "parsed instance");

    Ok(Instance {
        name,
        edge_weight_type,
        cities,
        matrix,
    })
}

/// Header fields the solver cares about.
#[derive(Debug, Default)]
struct Header {
    name: Option<String>,
    dimension: Option<usize>,
    dimension_line: usize,
    edge_weight_type: Option<String>,
    edge_weight_format: Option<String>,
}

impl Header {
    fn set(&mut self, line_no: usize, line: &str) -> Result<(), TsplibError> {
        let (key, value) = match line.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => match line.split_once(char::is_whitespace) {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (line, ""),
            },
        };

        match key {
            "NAME" => self.name = Some(value.to_string()),
            "DIMENSION" => {
                let dimension = value.parse().map_err(|_| TsplibError::InvalidValue {
                    line: line_no,
                    what: "DIMENSION",
                    value: value.to_string(),
                })?;
                self.dimension = Some(dimension);
                self.dimension_line = line_no;
            }
            "EDGE_WEIGHT_TYPE" => self.edge_weight_type = Some(value.to_string()),
            "EDGE_WEIGHT_FORMAT" => self.edge_weight_format = Some(value.to_string()),
            // TYPE, COMMENT, DISPLAY_DATA_TYPE and friends carry nothing we use.
            _ => {}
        }
        Ok(())
    }

    fn dimension(&self) -> Result<usize, TsplibError> {
        self.dimension.ok_or(TsplibError::MissingField("DIMENSION"))
    }

    fn invalid_dimension(&self) -> TsplibError {
        TsplibError::InvalidValue {
            line: self.dimension_line,
            what: "DIMENSION",
            value: self.dimension.unwrap_or_default().to_string(),
        }
    }

    fn weight_format(&self) -> Result<WeightFormat, TsplibError> {
        let format = self
            .edge_weight_format
            .as_deref()
            .ok_or(TsplibError::MissingField("EDGE_WEIGHT_FORMAT"))?;
        WeightFormat::parse(format)
    }
}

/// Layout of an explicit `EDGE_WEIGHT_SECTION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeightFormat {
    FullMatrix,
    UpperRow,
    LowerRow,
    UpperDiagRow,
    LowerDiagRow,
}

impl WeightFormat {
    fn parse(value: &str) -> Result<Self, TsplibError> {
        match value {
            "FULL_MATRIX" => Ok(Self::FullMatrix),
            "UPPER_ROW" => Ok(Self::UpperRow),
            "LOWER_ROW" => Ok(Self::LowerRow),
            "UPPER_DIAG_ROW" => Ok(Self::UpperDiagRow),
            "LOWER_DIAG_ROW" => Ok(Self::LowerDiagRow),
            other => Err(TsplibError::UnsupportedWeightFormat(other.to_string())),
        }
    }

    /// Cells listed by this format, in file order.
    fn cells(self, n: usize) -> Box<dyn Iterator<Item = (usize, usize)>> {
        match self {
            Self::FullMatrix => Box::new((0..n).flat_map(move |i| (0..n).map(move |j| (i, j)))),
            Self::UpperRow => Box::new((0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))),
            Self::LowerRow => Box::new((0..n).flat_map(move |i| (0..i).map(move |j| (i, j)))),
            Self::UpperDiagRow => Box::new((0..n).flat_map(move |i| (i..n).map(move |j| (i, j)))),
            Self::LowerDiagRow => Box::new((0..n).flat_map(move |i| (0..=i).map(move |j| (i, j)))),
        }
    }

    /// Number of weights the section lists; `None` if it overflows `usize`.
    fn entry_count(self, n: usize) -> Option<usize> {
        match self {
            Self::FullMatrix => n.checked_mul(n),
            Self::UpperRow | Self::LowerRow => n.checked_mul(n.saturating_sub(1)).map(|c| c / 2),
            Self::UpperDiagRow | Self::LowerDiagRow => {
                n.checked_mul(n.checked_add(1)?).map(|c| c / 2)
            }
        }
    }

    /// Expands the listed weights into a square matrix with a zero diagonal.
    ///
    /// Triangular formats are mirrored.
    fn build(self, weights: &[f64], n: usize) -> DistanceMatrix {
        let mut matrix = DistanceMatrix::zeros(n);
        for ((i, j), &w) in self.cells(n).zip(weights) {
            if i == j {
                continue;
            }
            matrix.set(i, j, w);
            if self != Self::FullMatrix {
                matrix.set(j, i, w);
            }
        }
        matrix
    }
}

fn metric_for(edge_weight_type: &str) -> Result<Metric, TsplibError> {
    match edge_weight_type {
        "EUC_2D" => Ok(Metric::Euc2d),
        "CEIL_2D" => Ok(Metric::Ceil2d),
        "ATT" => Ok(Metric::Att),
        "GEO" => Ok(Metric::Geo),
        other => Err(TsplibError::UnsupportedWeightType(other.to_string())),
    }
}

fn read_coordinates<'a, I>(
    lines: &mut Peekable<I>,
    dimension: usize,
) -> Result<Vec<City>, TsplibError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut cities = Vec::with_capacity(dimension.min(MAX_RESERVE));
    let mut ids = HashSet::with_capacity(dimension.min(MAX_RESERVE));
    while cities.len() < dimension {
        let Some((line_no, line)) = lines.next_if(|(_, l)| starts_numeric(l)) else {
            return Err(TsplibError::Truncated {
                section: "NODE_COORD_SECTION",
                expected: dimension,
                found: cities.len(),
            });
        };

        let mut tokens = line.split_whitespace();
        let id: usize = parse_token(tokens.next(), line_no, "city id")?;
        if !ids.insert(id) {
            return Err(TsplibError::InvalidValue {
                line: line_no,
                what: "city id",
                value: id.to_string(),
            });
        }
        let x = parse_token(tokens.next(), line_no, "x coordinate")?;
        let y = parse_token(tokens.next(), line_no, "y coordinate")?;
        cities.push(City {
            id,
            position: Some((x, y)),
        });
    }
    Ok(cities)
}

fn read_weights<'a, I>(lines: &mut Peekable<I>, expected: usize) -> Result<Vec<f64>, TsplibError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut weights = Vec::with_capacity(expected.min(MAX_RESERVE));
    while weights.len() < expected {
        let Some((line_no, line)) = lines.next_if(|(_, l)| starts_numeric(l)) else {
            return Err(TsplibError::Truncated {
                section: "EDGE_WEIGHT_SECTION",
                expected,
                found: weights.len(),
            });
        };

        for token in line.split_whitespace() {
            let weight: f64 = parse_token(Some(token), line_no, "edge weight")?;
            if weight < 0.0 {
                return Err(TsplibError::InvalidValue {
                    line: line_no,
                    what: "edge weight",
                    value: token.to_string(),
                });
            }
            weights.push(weight);
        }
    }
    weights.truncate(expected);
    Ok(weights)
}

fn parse_token<T: std::str::FromStr>(
    token: Option<&str>,
    line: usize,
    what: &'static str,
) -> Result<T, TsplibError> {
    let token = token.unwrap_or_default();
    token.parse().map_err(|_| TsplibError::InvalidValue {
        line,
        what,
        value: token.to_string(),
    })
}

fn starts_numeric(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
}
