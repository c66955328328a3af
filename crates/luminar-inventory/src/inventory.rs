//! The process-wide record cache and nearest-neighbor query.

use std::path::PathBuf;
use std::sync::OnceLock;

use luminar_core::AssetRecord;

use crate::error::SourceError;
use crate::resolve::STRATEGY_ORDER;
use crate::schema::{ColumnMap, LogicalField};
use crate::source::{RowsSource, TabularSource};

type SourceOpener = Box<dyn Fn() -> Result<RowsSource, SourceError> + Send + Sync>;

/// Result of a nearest-neighbor query.
///
/// `record` is `None` and `distance_m` is `f64::MAX` when the cache holds no
/// records; callers surface that as "no match", not as an error.
#[derive(Debug)]
pub struct Nearest<'a> {
    pub record: Option<&'a AssetRecord>,
    pub distance_m: f64,
}

/// Lazily-built, thread-safe inventory of normalized asset records.
///
/// A single long-lived value owns the cache. The first call to [`records`]
/// (or any query) pays the full load; concurrent first callers are serialized
/// by the one-shot initializer so the build runs exactly once, and every
/// later read is lock-free. The cache is never invalidated — a process
/// restart is the only reload path.
///
/// [`records`]: Inventory::records
pub struct Inventory {
    opener: SourceOpener,
    cache: OnceLock<Vec<AssetRecord>>,
}

impl std::fmt::Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("loaded", &self.cache.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Inventory {
    /// Build an inventory over an arbitrary source opener. The opener runs at
    /// most once, on first access.
    pub fn new<F>(opener: F) -> Self
    where
        F: Fn() -> Result<RowsSource, SourceError> + Send + Sync + 'static,
    {
        Self {
            opener: Box::new(opener),
            cache: OnceLock::new(),
        }
    }

    /// Inventory backed by a CSV file. `None` means no source is configured;
    /// the service then runs with an empty dataset.
    #[must_use]
    pub fn from_csv_path(path: Option<PathBuf>) -> Self {
        Self::new(move || match &path {
            Some(path) => RowsSource::from_csv_path(path),
            None => Err(SourceError::NotConfigured),
        })
    }

    /// The normalized records, loading them on first call.
    ///
    /// An unopenable source degrades to an empty, permanently "loaded" cache
    /// with the failure logged — the service stays up and answers "no match".
    pub fn records(&self) -> &[AssetRecord] {
        self.cache.get_or_init(|| match (self.opener)() {
            Ok(source) => load_records(&source),
            Err(error) => {
                tracing::error!(error = %error, "inventory unavailable, serving empty dataset");
                Vec::new()
            }
        })
    }

    /// Nearest record to the query point by Haversine distance.
    ///
    /// Linear scan over the cache; ties go to the first record in load order.
    /// O(n) by design — the dataset is small enough that a spatial index
    /// would not pay for itself.
    pub fn find_nearest(&self, lat: f64, lon: f64) -> Nearest<'_> {
        let mut best: Option<&AssetRecord> = None;
        let mut best_distance = f64::MAX;
        for record in self.records() {
            let distance = record.distance_m(lat, lon);
            if distance < best_distance {
                best = Some(record);
                best_distance = distance;
            }
        }
        Nearest {
            record: best,
            distance_m: best_distance,
        }
    }
}

/// Run schema discovery and per-row resolution over a full source.
///
/// Rows that fail every coordinate encoding are dropped with a warning; one
/// bad row never aborts the load.
fn load_records(source: &dyn TabularSource) -> Vec<AssetRecord> {
    let map = ColumnMap::from_header(source.header());
    if map.is_empty() {
        tracing::warn!("no known columns found in inventory header");
    }

    let mut records = Vec::new();
    for row in 1..=source.row_count() {
        if let Some(record) = resolve_row(source, &map, row) {
            records.push(record);
        } else {
            tracing::warn!(row, "dropping row without resolvable coordinates");
        }
    }
    tracing::info!(
        rows = source.row_count(),
        kept = records.len(),
        "inventory load complete"
    );
    records
}

fn resolve_row(source: &dyn TabularSource, map: &ColumnMap, row: usize) -> Option<AssetRecord> {
    let (lat, lon) = STRATEGY_ORDER
        .iter()
        .find_map(|strategy| strategy.resolve(source, map, row))?;

    Some(AssetRecord {
        neighborhood: text_at(source, map, row, LogicalField::Neighborhood),
        address: text_at(source, map, row, LogicalField::Address),
        code: text_at(source, map, row, LogicalField::Code),
        technology: text_at(source, map, row, LogicalField::Technology),
        power: text_at(source, map, row, LogicalField::Power),
        latitude: Some(lat),
        longitude: Some(lon),
    })
}

fn text_at(
    source: &dyn TabularSource,
    map: &ColumnMap,
    row: usize,
    field: LogicalField,
) -> Option<String> {
    use crate::source::CellValue;

    match source.cell(row, map.get(field)?)? {
        CellValue::Text(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        CellValue::Number(n) => Some(n.to_string()),
        CellValue::Empty => None,
    }
}
