//! Per-column missing-value counts.

use serde::Serialize;

use crate::types::Table;

/// Missing-value statistics of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    pub missing_share: f64,
}

/// Columns that have at least one missing value, in table order.
///
/// An empty table means "computed, nothing missing".
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct MissingTable {
    entries: Vec<MissingEntry>,
}

impl MissingTable {
    /// Entry for `column`, or `None` if it has no missing values (or does not exist).
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    pub fn entries(&self) -> &[MissingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest missing share, 0 when nothing is missing.
    pub fn max_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.missing_share)
            .fold(0.0, f64::max)
    }

    /// Entries whose share is at least `min_share`.
    pub fn at_or_above(&self, min_share: f64) -> impl Iterator<Item = &MissingEntry> {
        self.entries.iter().filter(move |e| e.missing_share >= min_share)
    }
}

/// Count missing values per column of `table`.
pub fn missing_table(table: &Table) -> MissingTable {
    let n_rows = table.row_count();
    if n_rows == 0 {
        return MissingTable::default();
    }

    let entries = table
        .columns()
        .iter()
        .filter_map(|col| {
            let missing_count = col.missing_count();
            (missing_count > 0).then(|| MissingEntry {
                column: col.name.clone(),
                missing_count,
                missing_share: missing_count as f64 / n_rows as f64,
            })
        })
        .collect();

    MissingTable { entries }
}
