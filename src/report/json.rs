//! Compact machine-readable quality summary (`summary.json`).

use serde::Serialize;

use crate::execution::EdaReport;
use crate::profiling::QualityFlags;

/// Issue attached to a column in [`JsonSummary::problematic_columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnIssue {
    HighMissingShare,
    ConstantColumn,
    HighCardinality,
    ManyZeroValues,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblematicColumn {
    pub name: String,
    pub issue: ColumnIssue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_share: Option<f64>,
}

/// The six boolean quality flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityFlagSet {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub has_constant_columns: bool,
    pub has_high_cardinality_categoricals: bool,
    pub has_many_zero_values: bool,
}

impl From<&QualityFlags> for QualityFlagSet {
    fn from(f: &QualityFlags) -> Self {
        Self {
            too_few_rows: f.too_few_rows,
            too_many_columns: f.too_many_columns,
            too_many_missing: f.too_many_missing,
            has_constant_columns: f.has_constant_columns,
            has_high_cardinality_categoricals: f.has_high_cardinality_categoricals,
            has_many_zero_values: f.has_many_zero_values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub quality_score: f64,
    pub problematic_columns: Vec<ProblematicColumn>,
    pub quality_flags: QualityFlagSet,
}

/// Build the compact summary of `report`.
///
/// Columns whose missing share is at least `min_missing_share` come first, followed by the
/// constant, high-cardinality and zero-heavy columns named by the quality flags. A column can
/// appear once per issue.
pub fn json_summary(report: &EdaReport, min_missing_share: f64) -> JsonSummary {
    let quality = &report.quality;

    let mut problematic_columns: Vec<ProblematicColumn> = report
        .missing
        .at_or_above(min_missing_share)
        .map(|e| ProblematicColumn {
            name: e.column.clone(),
            issue: ColumnIssue::HighMissingShare,
            missing_share: Some(e.missing_share),
        })
        .collect();

    for (names, issue) in [
        (&quality.constant_columns, ColumnIssue::ConstantColumn),
        (&quality.high_cardinality_columns, ColumnIssue::HighCardinality),
        (&quality.zero_columns, ColumnIssue::ManyZeroValues),
    ] {
        problematic_columns.extend(names.iter().map(|name| ProblematicColumn {
            name: name.clone(),
            issue,
            missing_share: None,
        }));
    }

    JsonSummary {
        n_rows: report.summary.n_rows,
        n_cols: report.summary.n_cols,
        quality_score: quality.quality_score,
        problematic_columns,
        quality_flags: QualityFlagSet::from(quality),
    }
}
