//! Dataset-level summary and its flat tabular projection.

use std::fmt;

use serde::Serialize;

use crate::types::{DtypeKind, Table};

use super::classify::classify_table;
use super::column::{profile_columns_with_kinds, ColumnSummary};

/// Marker rendered for statistics that are undefined or do not apply to a column's type.
pub const NOT_APPLICABLE: &str = "n/a";

/// Header of [`flatten_for_display`], in output order.
pub const DISPLAY_COLUMNS: [&str; 14] = [
    "name",
    "dtype_kind",
    "non_null_count",
    "missing_count",
    "missing_share",
    "distinct_count",
    "most_frequent_value",
    "min",
    "max",
    "mean",
    "std",
    "q25",
    "median",
    "q75",
];

/// Shape of a table plus one [`ColumnSummary`] per column, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Assemble a summary from profiled columns.
    pub fn new(n_rows: usize, columns: Vec<ColumnSummary>) -> Self {
        Self {
            n_rows,
            n_cols: columns.len(),
            columns,
        }
    }

    /// Summary of the column called `name`.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Profile every column of `table` into a [`DatasetSummary`].
pub fn summarize(table: &Table) -> DatasetSummary {
    let kinds = classify_table(table);
    summarize_with_kinds(table, &kinds)
}

/// Same as [`summarize`], using kinds already computed by [`super::classify_table`].
pub fn summarize_with_kinds(table: &Table, kinds: &[DtypeKind]) -> DatasetSummary {
    DatasetSummary::new(table.row_count(), profile_columns_with_kinds(table, kinds))
}

/// Flat, string-rendered view of a [`DatasetSummary`]: one row per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl fmt::Display for SummaryTable {
    /// Left-aligned, space-padded text table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let write_line = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let line = cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{c:<w$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{}", line.trim_end())
        };

        write_line(f, &self.headers)?;
        for row in &self.rows {
            write_line(f, row)?;
        }
        Ok(())
    }
}

/// Project `summary` into rows of strings with the [`DISPLAY_COLUMNS`] ordering.
///
/// Statistics that are undefined or that do not apply to the column type are rendered as
/// [`NOT_APPLICABLE`], never as an empty string or zero.
pub fn flatten_for_display(summary: &DatasetSummary) -> SummaryTable {
    let rows = summary
        .columns
        .iter()
        .map(|c| {
            let mut row = vec![
                c.name.clone(),
                c.dtype_kind.to_string(),
                c.non_null_count.to_string(),
                c.missing_count.to_string(),
                format_stat(c.missing_share),
                c.distinct_count.to_string(),
                c.frequency
                    .as_ref()
                    .and_then(|f| f.most_frequent_value.clone())
                    .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            ];
            let stats = c.numeric.as_ref();
            for stat in [
                stats.and_then(|s| s.min),
                stats.and_then(|s| s.max),
                stats.and_then(|s| s.mean),
                stats.and_then(|s| s.std),
                stats.and_then(|s| s.q25),
                stats.and_then(|s| s.median),
                stats.and_then(|s| s.q75),
            ] {
                row.push(format_optional(stat));
            }
            row
        })
        .collect();

    SummaryTable {
        headers: DISPLAY_COLUMNS.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

/// Render a statistic with at most four decimals and no trailing zeros.
pub fn format_stat(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// [`format_stat`] for an optional statistic, [`NOT_APPLICABLE`] when undefined.
pub fn format_optional(v: Option<f64>) -> String {
    v.map(format_stat)
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}
