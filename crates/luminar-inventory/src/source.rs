//! Tabular source abstraction.
//!
//! The loader does not care where the table comes from — file, network,
//! generated — only that cells surface as numeric or text and that rows and
//! columns are addressable. Columns and data rows are 1-based, matching how
//! spreadsheet tooling numbers them.

use std::path::Path;

use crate::error::SourceError;

/// A single cell of the source table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Text content of the cell, if it is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) | CellValue::Empty => None,
        }
    }

    /// Decimal value of the cell: numeric cells directly, text cells through
    /// invariant-format (`.` decimal separator) parsing.
    #[must_use]
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Empty => None,
        }
    }
}

/// Logical row/column access to a loaded table.
pub trait TabularSource {
    /// The header row, in column order.
    fn header(&self) -> &[CellValue];

    /// Cell at 1-based data row `row` (the first row after the header is
    /// row 1) and 1-based column `col`. `None` outside the extents.
    fn cell(&self, row: usize, col: usize) -> Option<&CellValue>;

    /// Number of data rows (excluding the header).
    fn row_count(&self) -> usize;

    /// Number of columns in the header row.
    fn column_count(&self) -> usize;
}

/// An in-memory table: one header row plus data rows.
///
/// This is the only concrete source; the CSV constructor materializes the
/// whole file up front since the dataset is assumed to fit in memory and is
/// read exactly once per process.
#[derive(Debug, Clone)]
pub struct RowsSource {
    header: Vec<CellValue>,
    rows: Vec<Vec<CellValue>>,
}

impl RowsSource {
    #[must_use]
    pub fn new(header: Vec<CellValue>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { header, rows }
    }

    /// Read a CSV file into a source. The first record is the header; every
    /// cell surfaces as text (or empty), numeric interpretation happens at
    /// parse time.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the file cannot be opened or read.
    pub fn from_csv_path(path: &Path) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?.iter().map(cell_from_str).collect(),
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for record in records {
            rows.push(record?.iter().map(cell_from_str).collect());
        }

        Ok(Self { header, rows })
    }
}

fn cell_from_str(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

impl TabularSource for RowsSource {
    fn header(&self) -> &[CellValue] {
        &self.header
    }

    fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows.get(row - 1)?.get(col - 1)
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.header.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn as_decimal_handles_numeric_and_text_cells() {
        assert_eq!(CellValue::Number(10.745).as_decimal(), Some(10.745));
        assert_eq!(
            CellValue::Text(" -74.758 ".to_string()).as_decimal(),
            Some(-74.758)
        );
        assert_eq!(CellValue::Text("norte".to_string()).as_decimal(), None);
        assert_eq!(CellValue::Empty.as_decimal(), None);
    }

    #[test]
    fn rows_source_addressing_is_one_based() {
        let source = RowsSource::new(
            vec![CellValue::Text("Lat".into()), CellValue::Text("Lon".into())],
            vec![vec![CellValue::Number(1.0), CellValue::Number(2.0)]],
        );
        assert_eq!(source.row_count(), 1);
        assert_eq!(source.column_count(), 2);
        assert_eq!(source.cell(1, 1), Some(&CellValue::Number(1.0)));
        assert_eq!(source.cell(1, 2), Some(&CellValue::Number(2.0)));
        assert_eq!(source.cell(0, 1), None);
        assert_eq!(source.cell(1, 0), None);
        assert_eq!(source.cell(2, 1), None);
        assert_eq!(source.cell(1, 3), None);
    }

    #[test]
    fn csv_file_loads_header_and_rows() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "Barrio,Lat,Lon").expect("write");
        writeln!(file, "El Prado,10.99,-74.79").expect("write");
        writeln!(file, "Centro,,").expect("write");

        let source = RowsSource::from_csv_path(file.path()).expect("load csv");
        assert_eq!(source.column_count(), 3);
        assert_eq!(source.row_count(), 2);
        assert_eq!(source.header()[0], CellValue::Text("Barrio".to_string()));
        assert_eq!(source.cell(1, 2), Some(&CellValue::Text("10.99".to_string())));
        assert_eq!(source.cell(2, 2), Some(&CellValue::Empty));
    }

    #[test]
    fn missing_csv_file_is_an_error() {
        let result = RowsSource::from_csv_path(Path::new("/nonexistent/luminarias.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn empty_csv_yields_empty_source() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let source = RowsSource::from_csv_path(file.path()).expect("load csv");
        assert_eq!(source.row_count(), 0);
        assert_eq!(source.column_count(), 0);
    }
}
