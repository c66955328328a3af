//! Per-row coordinate resolution.
//!
//! Tries encodings in strict priority order (decimal `Lat`/`Lon` columns,
//! long-form `Latitud`/`Longitud` columns, a combined degree/minute text
//! cell, projected grid `Easting`/`Northing` through the datum transform)
//! and stops at the first one that yields both coordinates. A strategy that
//! cannot produce a full pair simply defers to the next; only a row failing
//! all four is dropped.

use luminar_geo::{find_dms_pair, parse_dms, to_geographic};

use crate::schema::{ColumnMap, LogicalField};
use crate::source::TabularSource;

/// One coordinate encoding the loader knows how to read.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Strategy {
    /// Short-form decimal degree columns.
    DirectColumns,
    /// Long-form decimal degree columns.
    AltNameColumns,
    /// A single text cell holding both coordinates.
    CombinedCell,
    /// Projected grid coordinates requiring the inverse datum transform.
    ProjectedColumns,
}

/// Evaluation order. Decimal degrees win over everything; the projected grid
/// is the last resort because it is the only lossy (series-approximated)
/// path.
pub(crate) const STRATEGY_ORDER: [Strategy; 4] = [
    Strategy::DirectColumns,
    Strategy::AltNameColumns,
    Strategy::CombinedCell,
    Strategy::ProjectedColumns,
];

impl Strategy {
    /// Attempt this encoding for the given row. `None` means "try the next
    /// one", never a hard failure.
    pub(crate) fn resolve(
        self,
        source: &dyn TabularSource,
        map: &ColumnMap,
        row: usize,
    ) -> Option<(f64, f64)> {
        match self {
            Strategy::DirectColumns => decimal_pair(
                source,
                map,
                row,
                LogicalField::Latitude,
                LogicalField::Longitude,
            ),
            Strategy::AltNameColumns => decimal_pair(
                source,
                map,
                row,
                LogicalField::LatitudeAlt,
                LogicalField::LongitudeAlt,
            ),
            Strategy::CombinedCell => {
                let col = map.get(LogicalField::Coordinates)?;
                let text = source.cell(row, col)?.as_text()?;
                combined_pair(text)
            }
            Strategy::ProjectedColumns => {
                let easting = decimal_at(source, map, row, LogicalField::Easting)?;
                let northing = decimal_at(source, map, row, LogicalField::Northing)?;
                Some(to_geographic(easting, northing))
            }
        }
    }
}

fn decimal_at(
    source: &dyn TabularSource,
    map: &ColumnMap,
    row: usize,
    field: LogicalField,
) -> Option<f64> {
    let col = map.get(field)?;
    source.cell(row, col)?.as_decimal()
}

fn decimal_pair(
    source: &dyn TabularSource,
    map: &ColumnMap,
    row: usize,
    lat_field: LogicalField,
    lon_field: LogicalField,
) -> Option<(f64, f64)> {
    let lat = decimal_at(source, map, row, lat_field)?;
    let lon = decimal_at(source, map, row, lon_field)?;
    Some((lat, lon))
}

/// Decode a combined coordinate cell.
///
/// Comma-separated cells must split into exactly two degree/minute parts,
/// latitude first. Cells without a comma fall back to searching for
/// hemisphere-tagged groups anywhere in the text.
fn combined_pair(text: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = text.split(',').collect();
    match parts.as_slice() {
        [lat_part, lon_part] => {
            let lat = parse_dms(lat_part)?;
            let lon = parse_dms(lon_part)?;
            Some((lat, lon))
        }
        [whole] => find_dms_pair(whole),
        _ => None,
    }
}
