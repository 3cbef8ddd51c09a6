//! Per-column descriptive statistics.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{Column, DtypeKind, Table};

use super::categories::value_counts;
use super::classify::classify_table;

/// Descriptive statistics of a numeric column, computed over non-missing values.
///
/// `None` means the statistic is undefined (no values, or too few values for `std`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
}

impl NumericStats {
    /// Statistics of a numeric column with no non-missing values.
    pub fn undefined() -> Self {
        Self {
            min: None,
            max: None,
            mean: None,
            std: None,
            q25: None,
            median: None,
            q75: None,
        }
    }

    /// Compute statistics over `values` (missing values already removed).
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::undefined();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = (sorted.len() >= 2).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        });

        Self {
            min: sorted.first().copied(),
            max: sorted.last().copied(),
            mean: Some(mean),
            std,
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
        }
    }
}

/// Linear-interpolation quantile of an ascending slice.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Frequency statistics of a non-numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyStats {
    /// Most frequent non-missing value; ties go to the value seen first in row order.
    pub most_frequent_value: Option<String>,
    /// Occurrences of `most_frequent_value` (0 when the column has no values).
    pub most_frequent_count: usize,
}

/// Profile of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype_kind: DtypeKind,
    pub non_null_count: usize,
    pub missing_count: usize,
    /// `missing_count / n_rows`, 0 for an empty table.
    pub missing_share: f64,
    /// Distinct non-missing values.
    pub distinct_count: usize,
    /// Present for [`DtypeKind::Numeric`] columns only.
    pub numeric: Option<NumericStats>,
    /// Present for every non-numeric column.
    pub frequency: Option<FrequencyStats>,
}

impl ColumnSummary {
    /// Returns `true` for numeric columns.
    pub fn is_numeric(&self) -> bool {
        self.dtype_kind == DtypeKind::Numeric
    }
}

/// Profile every column of `table`, preserving table order.
pub fn profile_columns(table: &Table) -> Vec<ColumnSummary> {
    let kinds = classify_table(table);
    profile_columns_with_kinds(table, &kinds)
}

/// Same as [`profile_columns`], using kinds already computed by [`super::classify_table`].
pub fn profile_columns_with_kinds(table: &Table, kinds: &[DtypeKind]) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .zip(kinds)
        .map(|(col, &kind)| profile_column(col, kind, table.row_count()))
        .collect()
}

/// Profile a single column already classified as `kind`.
pub fn profile_column(column: &Column, kind: DtypeKind, n_rows: usize) -> ColumnSummary {
    let missing_count = column.missing_count();
    let non_null_count = column.len() - missing_count;
    let missing_share = if n_rows == 0 {
        0.0
    } else {
        missing_count as f64 / n_rows as f64
    };

    let (distinct_count, numeric, frequency) = match kind {
        DtypeKind::Numeric => {
            let values: Vec<f64> = column.present().filter_map(|v| v.as_f64()).collect();
            let distinct = values
                .iter()
                // -0.0 and 0.0 are the same value
                .map(|v| (v + 0.0).to_bits())
                .collect::<HashSet<_>>()
                .len();
            (distinct, Some(NumericStats::from_values(&values)), None)
        }
        _ => {
            let counts = value_counts(column);
            let mut best: Option<(&String, usize)> = None;
            for (value, count) in &counts {
                if best.is_none_or(|(_, c)| *count > c) {
                    best = Some((value, *count));
                }
            }
            let frequency = FrequencyStats {
                most_frequent_value: best.map(|(v, _)| v.clone()),
                most_frequent_count: best.map(|(_, c)| c).unwrap_or(0),
            };
            (counts.len(), None, Some(frequency))
        }
    };

    ColumnSummary {
        name: column.name.clone(),
        dtype_kind: kind,
        non_null_count,
        missing_count,
        missing_share,
        distinct_count,
        numeric,
        frequency,
    }
}
