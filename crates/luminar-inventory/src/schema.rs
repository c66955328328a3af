//! Header schema discovery.
//!
//! Source tables come from different contractors and eras, so column names
//! vary ("Barrio" vs "BARRIO", "Lat" vs "Latitud", Spanish and English grid
//! names). Discovery walks the header row left to right and matches each cell
//! against a declarative, priority-ordered rule list; the first header
//! matching a logical field claims it and the field is never reassigned.

use std::collections::HashMap;

use crate::source::CellValue;

/// The fixed vocabulary of logical fields a column can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    Neighborhood,
    Address,
    Code,
    Technology,
    Power,
    /// A single cell carrying both coordinates as text.
    Coordinates,
    Latitude,
    Longitude,
    Easting,
    Northing,
    /// Long-form "latitud" column, distinct from the short "lat" header.
    LatitudeAlt,
    LongitudeAlt,
}

/// How a rule's keywords are matched against a lowercased, trimmed header.
#[derive(Debug, Clone, Copy)]
enum Keywords {
    Substring(&'static [&'static str]),
    Prefix(&'static [&'static str]),
    /// Whole-cell equality. Only the combined coordinates header uses this:
    /// it must not be claimable through the generic substring rule.
    ExactWord(&'static str),
}

impl Keywords {
    fn matches(self, header: &str) -> bool {
        match self {
            Keywords::Substring(words) => words.iter().any(|w| header.contains(w)),
            Keywords::Prefix(words) => words.iter().any(|w| header.starts_with(w)),
            Keywords::ExactWord(word) => header == word,
        }
    }
}

/// Rule list in evaluation priority order.
///
/// Order matters twice: earlier fields get first claim on an ambiguous
/// header, and the `lat`/`lon` prefix rules sit before the long-form
/// `latitud`/`longitud` substring rules so a short header claims the primary
/// field while a long-form header in the same table still lands on the
/// alternate one.
const FIELD_RULES: &[(LogicalField, Keywords)] = &[
    (LogicalField::Neighborhood, Keywords::Substring(&["barrio"])),
    (LogicalField::Address, Keywords::Substring(&["direcc"])),
    (
        LogicalField::Code,
        Keywords::Substring(&["codigo", "código"]),
    ),
    (LogicalField::Technology, Keywords::Substring(&["tecnolog"])),
    (LogicalField::Power, Keywords::Substring(&["potencia"])),
    (
        LogicalField::Coordinates,
        Keywords::ExactWord("coordenadas"),
    ),
    (LogicalField::Latitude, Keywords::Prefix(&["lat"])),
    (LogicalField::Longitude, Keywords::Prefix(&["lon"])),
    (
        LogicalField::Easting,
        Keywords::Substring(&["este", "east"]),
    ),
    (
        LogicalField::Northing,
        Keywords::Substring(&["norte", "north"]),
    ),
    (LogicalField::LatitudeAlt, Keywords::Substring(&["latitud"])),
    (
        LogicalField::LongitudeAlt,
        Keywords::Substring(&["longitud"]),
    ),
];

/// Mapping from logical field to 1-based column position.
#[derive(Debug, Default)]
pub struct ColumnMap {
    columns: HashMap<LogicalField, usize>,
}

impl ColumnMap {
    /// Infer the column map from a header row.
    ///
    /// Headers are trimmed and lowercased; empty and non-text cells are
    /// skipped. A single header may claim several logical fields (e.g.
    /// "latitud" satisfies both the `lat` prefix and the long-form rule), but
    /// a field already claimed by an earlier header is never reassigned.
    #[must_use]
    pub fn from_header(header: &[CellValue]) -> Self {
        let mut map = Self::default();
        for (idx, cell) in header.iter().enumerate() {
            let Some(text) = cell.as_text() else { continue };
            let lowered = text.trim().to_lowercase();
            if lowered.is_empty() {
                continue;
            }
            for (field, keywords) in FIELD_RULES {
                if !map.columns.contains_key(field) && keywords.matches(&lowered) {
                    map.columns.insert(*field, idx + 1);
                }
            }
        }
        map
    }

    /// 1-based column for the field, if the header contained one.
    #[must_use]
    pub fn get(&self, field: LogicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
