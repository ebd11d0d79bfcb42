//! TSPLIB tour output.

use super::{Instance, TsplibError};
use crate::ga::Tour;
use std::path::Path;

/// Renders `tour` in the TSPLIB `TOUR` format.
///
/// City identifiers are written as listed in the instance file, one per
/// line, followed by `EOF` without a trailing newline.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::Tour;
/// use u_tsp::tsplib::{format_tour, parse};
///
/// let instance = parse(
///     "NAME: pair\nDIMENSION: 2\nEDGE_WEIGHT_TYPE: EUC_2D\n\
///      NODE_COORD_SECTION\n1 0 0\n2 3 4\nEOF\n",
/// ).unwrap();
/// let tour = Tour::evaluated(vec![1, 0], &instance).unwrap();
///
/// assert_eq!(
///     format_tour(&instance, &tour),
///     "NAME: pair\nTYPE: TOUR\nDIMENSION: 2\nDISTANCE: 5.00\nTOUR_SECTION\n2\n1\nEOF",
/// );
/// ```
pub fn format_tour(instance: &Instance, tour: &Tour) -> String {
    let mut out = format!(
        "NAME: {}\nTYPE: TOUR\nDIMENSION: {}\nDISTANCE: {:.2}\nTOUR_SECTION\n",
        instance.name,
        tour.len(),
        tour.distance()
    );
    for &city in tour.cities() {
        out.push_str(&instance.cities[city].id.to_string());
        out.push('\n');
    }
    out.push_str("EOF");
    out
}

/// Writes `tour` to `path` in the TSPLIB `TOUR` format.
pub fn write_tour(
    path: impl AsRef<Path>,
    instance: &Instance,
    tour: &Tour,
) -> Result<(), TsplibError> {
    std::fs::write(path, format_tour(instance, tour))?;
    Ok(())
}

/// Renders `tour` as space-separated `id,x,y` triples in visiting order.
///
/// Cities without coordinates are printed at `0.00,0.00`.
pub fn format_plot(instance: &Instance, tour: &Tour) -> String {
    tour.cities()
        .iter()
        .map(|&city| {
            let c = &instance.cities[city];
            let (x, y) = c.position.unwrap_or_default();
            format!("{},{x:.2},{y:.2}", c.id)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
