//! Inventory loading, schema discovery and nearest-neighbor lookup.
//!
//! The loader turns an arbitrary tabular dump of street-light fixtures into
//! normalized [`luminar_core::AssetRecord`]s: the header row is matched
//! against known column-name variants, then each data row runs through a
//! fixed priority order of coordinate encodings (decimal degrees, alternate
//! column names, combined degree/minute strings, projected grid coordinates)
//! until one yields a WGS84 position. The result is cached once per process
//! and served to concurrent nearest-neighbor queries without locking.

mod error;
mod inventory;
mod resolve;
mod schema;
mod source;

pub use error::SourceError;
pub use inventory::{Inventory, Nearest};
pub use schema::{ColumnMap, LogicalField};
pub use source::{CellValue, RowsSource, TabularSource};
