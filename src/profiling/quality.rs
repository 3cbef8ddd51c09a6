//! Heuristic data-quality flags.
//!
//! Every rule is a fixed threshold from [`QualityThresholds`]; nothing here is a statistical
//! test. The aggregate [`QualityFlags::quality_score`] starts at 1.0 and loses a fixed weight
//! per active flag plus a share proportional to the worst column's missing share.

use serde::{Deserialize, Serialize};

use crate::types::Table;

use super::missing::MissingTable;
use super::summary::DatasetSummary;

const WEIGHT_MISSING_SHARE: f64 = 0.40;
const WEIGHT_TOO_FEW_ROWS: f64 = 0.15;
const WEIGHT_TOO_MANY_COLUMNS: f64 = 0.05;
const WEIGHT_TOO_MANY_MISSING: f64 = 0.10;
const WEIGHT_CONSTANT_COLUMNS: f64 = 0.10;
const WEIGHT_HIGH_CARDINALITY: f64 = 0.10;
const WEIGHT_ZERO_VALUES: f64 = 0.10;

/// Score reported for a table with no rows or no columns.
pub const EMPTY_TABLE_SCORE: f64 = 0.0;

/// Thresholds used by [`quality_flags_with_thresholds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// `too_few_rows` fires when `n_rows < min_rows`.
    pub min_rows: usize,
    /// `too_many_columns` fires when `n_cols > max_columns`.
    pub max_columns: usize,
    /// `too_many_missing` fires when the worst missing share is above this (0.0-1.0).
    pub max_missing_share: f64,
    /// A non-numeric column is high-cardinality when `distinct / non_null` is above this.
    pub high_cardinality_share: f64,
    /// Minimum non-null values before a column can be flagged as high-cardinality.
    pub high_cardinality_min_count: usize,
    /// A numeric column is zero-heavy when at least this share of its values is 0.
    pub zero_share: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_rows: 10,
            max_columns: 50,
            max_missing_share: 0.5,
            high_cardinality_share: 0.9,
            high_cardinality_min_count: 5,
            zero_share: 0.5,
        }
    }
}

impl QualityThresholds {
    /// Creates thresholds with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub fn with_max_missing_share(mut self, share: f64) -> Self {
        self.max_missing_share = clamp_share("max_missing_share", share);
        self
    }

    pub fn with_high_cardinality_share(mut self, share: f64) -> Self {
        self.high_cardinality_share = clamp_share("high_cardinality_share", share);
        self
    }

    pub fn with_high_cardinality_min_count(mut self, count: usize) -> Self {
        self.high_cardinality_min_count = count;
        self
    }

    pub fn with_zero_share(mut self, share: f64) -> Self {
        self.zero_share = clamp_share("zero_share", share);
        self
    }

    /// Clamp every share into [0.0, 1.0]; useful after deserializing.
    pub fn normalized(self) -> Self {
        Self {
            max_missing_share: clamp_share("max_missing_share", self.max_missing_share),
            high_cardinality_share: clamp_share("high_cardinality_share", self.high_cardinality_share),
            zero_share: clamp_share("zero_share", self.zero_share),
            ..self
        }
    }
}

fn clamp_share(name: &str, share: f64) -> f64 {
    if share.is_nan() {
        tracing::warn!("{} is NaN, using 1.0", name);
        return 1.0;
    }
    if !(0.0..=1.0).contains(&share) {
        tracing::warn!("{} {} clamped to valid range [0.0, 1.0]", name, share);
    }
    share.clamp(0.0, 1.0)
}

/// Data-quality flags for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityFlags {
    /// Aggregate score in [0, 1]; 1.0 means no issue was detected.
    pub quality_score: f64,
    pub max_missing_share: f64,
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub has_constant_columns: bool,
    pub has_high_cardinality_categoricals: bool,
    pub has_many_zero_values: bool,
    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<String>,
    pub zero_columns: Vec<String>,
}

impl QualityFlags {
    /// Flags of a table with no rows or no columns: nothing fires, score is
    /// [`EMPTY_TABLE_SCORE`].
    pub fn empty() -> Self {
        Self {
            quality_score: EMPTY_TABLE_SCORE,
            max_missing_share: 0.0,
            too_few_rows: false,
            too_many_columns: false,
            too_many_missing: false,
            has_constant_columns: false,
            has_high_cardinality_categoricals: false,
            has_many_zero_values: false,
            constant_columns: Vec::new(),
            high_cardinality_columns: Vec::new(),
            zero_columns: Vec::new(),
        }
    }

    fn score(&self) -> f64 {
        let penalty = WEIGHT_MISSING_SHARE * self.max_missing_share
            + flag_weight(self.too_few_rows, WEIGHT_TOO_FEW_ROWS)
            + flag_weight(self.too_many_columns, WEIGHT_TOO_MANY_COLUMNS)
            + flag_weight(self.too_many_missing, WEIGHT_TOO_MANY_MISSING)
            + flag_weight(self.has_constant_columns, WEIGHT_CONSTANT_COLUMNS)
            + flag_weight(self.has_high_cardinality_categoricals, WEIGHT_HIGH_CARDINALITY)
            + flag_weight(self.has_many_zero_values, WEIGHT_ZERO_VALUES);
        (1.0 - penalty).clamp(0.0, 1.0)
    }
}

fn flag_weight(active: bool, weight: f64) -> f64 {
    if active { weight } else { 0.0 }
}

/// [`quality_flags_with_thresholds`] with [`QualityThresholds::default`].
pub fn quality_flags(summary: &DatasetSummary, missing: &MissingTable, table: &Table) -> QualityFlags {
    quality_flags_with_thresholds(summary, missing, table, &QualityThresholds::default())
}

/// Derive quality flags from a summary, its missing table and the raw table.
///
/// `table` is only read to count exact zeros in numeric columns.
pub fn quality_flags_with_thresholds(
    summary: &DatasetSummary,
    missing: &MissingTable,
    table: &Table,
    thresholds: &QualityThresholds,
) -> QualityFlags {
    if summary.n_rows == 0 || summary.n_cols == 0 {
        return QualityFlags::empty();
    }

    let max_missing_share = missing.max_share();

    let constant_columns: Vec<String> = summary
        .columns
        .iter()
        .filter(|c| c.non_null_count > 0 && c.distinct_count == 1)
        .map(|c| c.name.clone())
        .collect();

    let high_cardinality_columns: Vec<String> = summary
        .columns
        .iter()
        .filter(|c| c.dtype_kind.is_categorical_like())
        .filter(|c| {
            c.non_null_count > 0
                && c.non_null_count >= thresholds.high_cardinality_min_count
                && c.distinct_count as f64 / c.non_null_count as f64 > thresholds.high_cardinality_share
        })
        .map(|c| c.name.clone())
        .collect();

    let zero_columns: Vec<String> = summary
        .columns
        .iter()
        .filter(|c| c.is_numeric() && c.non_null_count > 0)
        .filter(|c| {
            table.column(&c.name).is_some_and(|col| {
                let zeros = col.present().filter(|v| v.as_f64() == Some(0.0)).count();
                zeros as f64 / c.non_null_count as f64 >= thresholds.zero_share
            })
        })
        .map(|c| c.name.clone())
        .collect();

    let mut flags = QualityFlags {
        quality_score: 1.0,
        max_missing_share,
        too_few_rows: summary.n_rows < thresholds.min_rows,
        too_many_columns: summary.n_cols > thresholds.max_columns,
        too_many_missing: max_missing_share > thresholds.max_missing_share,
        has_constant_columns: !constant_columns.is_empty(),
        has_high_cardinality_categoricals: !high_cardinality_columns.is_empty(),
        has_many_zero_values: !zero_columns.is_empty(),
        constant_columns,
        high_cardinality_columns,
        zero_columns,
    };
    flags.quality_score = flags.score();
    flags
}
