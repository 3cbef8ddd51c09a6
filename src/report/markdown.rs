//! Human-readable `report.md`.

use std::io::{self, Write};

use crate::execution::EdaReport;

use super::ReportOptions;

/// Write the markdown report for `report` into `w`.
///
/// Sections: header with the table shape, quality heuristics, columns, missing values,
/// correlation, categorical features, histograms and, when requested, a pointer to
/// `summary.json`.
pub fn write_markdown<W: Write>(w: &mut W, report: &EdaReport, options: &ReportOptions) -> io::Result<()> {
    let summary = &report.summary;
    let q = &report.quality;

    writeln!(w, "# {}\n", options.title)?;
    if let Some(source) = &options.source_name {
        writeln!(w, "Source file: `{source}`\n")?;
    }
    writeln!(w, "Rows: **{}**, columns: **{}**\n", summary.n_rows, summary.n_cols)?;

    writeln!(w, "## Data quality (heuristics)\n")?;
    writeln!(w, "- Quality score: **{:.2}**", q.quality_score)?;
    writeln!(w, "- Max missing share per column: **{}**", percent(q.max_missing_share, 2))?;
    writeln!(w, "- Too few rows: **{}**", q.too_few_rows)?;
    writeln!(w, "- Too many columns: **{}**", q.too_many_columns)?;
    writeln!(w, "- Too many missing values: **{}**", q.too_many_missing)?;
    writeln!(w, "- Constant columns: **{}**", q.has_constant_columns)?;
    if q.has_constant_columns {
        writeln!(w, "  - Columns: {}", q.constant_columns.join(", "))?;
    }
    writeln!(w, "- High-cardinality categoricals: **{}**", q.has_high_cardinality_categoricals)?;
    if q.has_high_cardinality_categoricals {
        writeln!(w, "  - Columns: {}", q.high_cardinality_columns.join(", "))?;
    }
    writeln!(w, "- Many zero values in numeric columns: **{}**", q.has_many_zero_values)?;
    if q.has_many_zero_values {
        writeln!(w, "  - Columns: {}", q.zero_columns.join(", "))?;
    }
    writeln!(
        w,
        "\n- Problematic missing threshold: **{}**\n",
        percent(options.min_missing_share, 1)
    )?;

    writeln!(w, "## Columns\n")?;
    writeln!(w, "See `summary.csv`.\n")?;

    writeln!(w, "## Missing values\n")?;
    if report.missing.is_empty() {
        writeln!(w, "No missing values or the dataset is empty.\n")?;
    } else {
        writeln!(w, "See `missing.csv` and `missing_matrix.svg`.\n")?;
        let problematic: Vec<_> = report.missing.at_or_above(options.min_missing_share).collect();
        if !problematic.is_empty() {
            writeln!(
                w,
                "### Problematic columns (missing >= {})\n",
                percent(options.min_missing_share, 1)
            )?;
            for e in problematic {
                writeln!(
                    w,
                    "- `{}`: {} missing ({} of {})",
                    e.column,
                    percent(e.missing_share, 1),
                    e.missing_count,
                    summary.n_rows
                )?;
            }
            writeln!(w)?;
        }
    }

    writeln!(w, "## Numeric correlation\n")?;
    if report.correlation.is_empty() {
        writeln!(w, "Not enough numeric columns for correlation.\n")?;
    } else {
        writeln!(w, "See `correlation.csv` and `correlation_heatmap.svg`.\n")?;
    }

    writeln!(w, "## Categorical features\n")?;
    if report.top_categories.is_empty() {
        writeln!(w, "No categorical columns found.\n")?;
    } else {
        writeln!(
            w,
            "See the files in `top_categories/` (top-{} values per column).\n",
            options.top_k
        )?;
    }

    writeln!(w, "## Histograms\n")?;
    if options.max_hist_columns > 0 && summary.columns.iter().any(|c| c.is_numeric()) {
        writeln!(
            w,
            "See the files `hist_*.svg` (up to {} numeric columns).\n",
            options.max_hist_columns
        )?;
    } else {
        writeln!(w, "No histograms were drawn.\n")?;
    }

    if options.json_summary {
        writeln!(w, "## JSON summary\n")?;
        writeln!(w, "A compact dataset summary is saved to `summary.json`.")?;
    }
    Ok(())
}

fn percent(share: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, share * 100.0)
}
