//! Report artifacts written to an output directory.
//!
//! [`write_report`] renders one [`EdaReport`] as:
//!
//! - `summary.csv`: the flattened per-column summary
//! - `missing.csv` and `correlation.csv`, when those tables are non-empty
//! - `top_categories/<column>.csv`, one file per profiled categorical column
//! - `report.md`
//! - `summary.json`, when [`ReportOptions::json_summary`] is set
//! - SVG charts: `hist_<column>.svg` for the first [`ReportOptions::max_hist_columns`] numeric
//!   columns, `missing_matrix.svg` and `correlation_heatmap.svg`

pub mod export;
pub mod json;
pub mod markdown;
pub mod plots;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::EdaResult;
use crate::execution::EdaReport;
use crate::profiling::flatten_for_display;
use crate::types::Table;

pub use json::{json_summary, ColumnIssue, JsonSummary, ProblematicColumn, QualityFlagSet};

/// Options for [`write_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Markdown title.
    pub title: String,
    /// Input file name shown in the markdown header.
    pub source_name: Option<String>,
    /// Columns with at least this missing share are listed as problematic.
    pub min_missing_share: f64,
    /// Also write `summary.json`.
    pub json_summary: bool,
    /// Values kept per categorical column, as configured for the analysis.
    pub top_k: usize,
    /// Numeric columns drawn as histograms.
    pub max_hist_columns: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "EDA report".to_string(),
            source_name: None,
            min_missing_share: 0.1,
            json_summary: false,
            top_k: 5,
            max_hist_columns: 6,
        }
    }
}

/// Paths written by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub out_dir: PathBuf,
    pub report_md: PathBuf,
    pub summary_csv: PathBuf,
    pub missing_csv: Option<PathBuf>,
    pub correlation_csv: Option<PathBuf>,
    pub top_categories: Vec<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub histograms: Vec<PathBuf>,
    pub missing_matrix: Option<PathBuf>,
    pub correlation_heatmap: Option<PathBuf>,
}

/// Write every artifact of `report` into `out_dir`, creating it if needed.
///
/// `table` is the table `report` was computed from; the charts are drawn from its values.
pub fn write_report(
    table: &Table,
    report: &EdaReport,
    options: &ReportOptions,
    out_dir: impl AsRef<Path>,
) -> EdaResult<ReportArtifacts> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let summary_csv = out_dir.join("summary.csv");
    export::write_summary_csv(&flatten_for_display(&report.summary), &summary_csv)?;

    let missing_csv = if report.missing.is_empty() {
        None
    } else {
        let path = out_dir.join("missing.csv");
        export::write_missing_csv(&report.missing, &path)?;
        Some(path)
    };

    let correlation_csv = if report.correlation.is_empty() {
        None
    } else {
        let path = out_dir.join("correlation.csv");
        export::write_correlation_csv(&report.correlation, &path)?;
        Some(path)
    };

    let top_categories = if report.top_categories.is_empty() {
        Vec::new()
    } else {
        export::write_top_categories(&report.top_categories, &out_dir.join("top_categories"))?
    };

    let histograms = plots::write_histograms(table, &report.summary, options.max_hist_columns, out_dir)?;

    let path = out_dir.join("missing_matrix.svg");
    let missing_matrix = plots::write_missing_matrix(table, &path)?.then_some(path);

    let path = out_dir.join("correlation_heatmap.svg");
    let correlation_heatmap = plots::write_correlation_heatmap(&report.correlation, &path)?.then_some(path);

    let report_md = out_dir.join("report.md");
    let mut w = BufWriter::new(File::create(&report_md)?);
    markdown::write_markdown(&mut w, report, options)?;
    w.flush()?;

    let summary_json = if options.json_summary {
        let path = out_dir.join("summary.json");
        let mut w = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut w, &json_summary(report, options.min_missing_share))?;
        writeln!(w)?;
        w.flush()?;
        Some(path)
    } else {
        None
    };

    tracing::info!(
        out_dir = %out_dir.display(),
        top_category_files = top_categories.len(),
        histograms = histograms.len(),
        json = summary_json.is_some(),
        "report written"
    );

    Ok(ReportArtifacts {
        out_dir: out_dir.to_path_buf(),
        report_md,
        summary_csv,
        missing_csv,
        correlation_csv,
        top_categories,
        summary_json,
        histograms,
        missing_matrix,
        correlation_heatmap,
    })
}
