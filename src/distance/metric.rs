//! Coordinate distance metrics.
//!
//! The rounded metrics follow the TSPLIB 95 definitions so that tour lengths
//! are comparable with published optima.
//!
//! # References
//!
//! - Reinelt (1995), "TSPLIB 95", section 2 (distance functions)

/// Earth radius used by the `GEO` metric, in kilometres.
const EARTH_RADIUS: f64 = 6378.388;

/// The truncated value of pi TSPLIB specifies for `GEO` conversions.
const TSPLIB_PI: f64 = 3.141592;

/// How the distance between two coordinates is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Exact Euclidean distance, no rounding.
    Euclidean,

    /// `EUC_2D`: Euclidean distance rounded to the nearest integer.
    Euc2d,

    /// `CEIL_2D`: Euclidean distance rounded up.
    Ceil2d,

    /// `ATT`: pseudo-Euclidean distance of the att48/att532 instances.
    Att,

    /// `GEO`: geographical distance; coordinates are `DDD.MM` latitude and
    /// longitude.
    Geo,
}

impl Metric {
    /// Distance from `a` to `b`.
    pub fn distance(self, a: (f64, f64), b: (f64, f64)) -> f64 {
        let xd = a.0 - b.0;
        let yd = a.1 - b.1;
        match self {
            Metric::Euclidean => (xd * xd + yd * yd).sqrt(),
            Metric::Euc2d => nint((xd * xd + yd * yd).sqrt()),
            Metric::Ceil2d => (xd * xd + yd * yd).sqrt().ceil(),
            Metric::Att => {
                let rij = ((xd * xd + yd * yd) / 10.0).sqrt();
                let tij = nint(rij);
                if tij < rij {
                    tij + 1.0
                } else {
                    tij
                }
            }
            Metric::Geo => {
                let (lat_a, lon_a) = (to_radians(a.0), to_radians(a.1));
                let (lat_b, lon_b) = (to_radians(b.0), to_radians(b.1));
                let q1 = (lon_a - lon_b).cos();
                let q2 = (lat_a - lat_b).cos();
                let q3 = (lat_a + lat_b).cos();
                let arc = (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).clamp(-1.0, 1.0).acos();
                (EARTH_RADIUS * arc + 1.0).trunc()
            }
        }
    }
}

fn nint(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Converts a TSPLIB `DDD.MM` coordinate to radians.
fn to_radians(value: f64) -> f64 {
    let degrees = value.trunc();
    let minutes = value - degrees;
    TSPLIB_PI * (degrees + 5.0 * minutes / 3.0) / 180.0
}
