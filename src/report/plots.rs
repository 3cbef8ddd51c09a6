//! SVG charts: per-column histograms, the missing-value matrix and the correlation heatmap.
//!
//! Charts use the plotters SVG backend, so rendering needs no system fonts.

use std::collections::HashSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::{EdaError, EdaResult};
use crate::profiling::{CorrelationMatrix, DatasetSummary};
use crate::types::Table;

use super::export::unique_file_stem;

const HIST_BINS: usize = 20;
const HIST_SIZE: (u32, u32) = (800, 500);
const MATRIX_SIZE: (u32, u32) = (1000, 600);
const HEATMAP_SIZE: (u32, u32) = (900, 800);

const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);
const PRESENT_COLOR: RGBColor = RGBColor(230, 236, 245);
const MISSING_COLOR: RGBColor = RGBColor(40, 40, 40);
const UNDEFINED_COLOR: RGBColor = RGBColor(170, 170, 170);
const NEGATIVE_COLOR: RGBColor = RGBColor(59, 76, 192);
const POSITIVE_COLOR: RGBColor = RGBColor(180, 4, 38);

fn plot_err(e: impl Display) -> EdaError {
    EdaError::plot(e.to_string())
}

/// Counts of `values` in `bins` equal-width bins over `[lo, hi)`; the last bin also holds `hi`.
///
/// Returns the (possibly widened) range and the counts. A single distinct value gets a unit
/// range centered on it.
pub fn histogram_bins(values: &[f64], bins: usize) -> ((f64, f64), Vec<u32>) {
    let bins = bins.max(1);
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if values.is_empty() {
        (0.0, 1.0)
    } else if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    };

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0u32; bins];
    for v in values {
        let i = (((v - lo) / width) as usize).min(bins - 1);
        counts[i] += 1;
    }
    ((lo, hi), counts)
}

/// Write `hist_<column>.svg` for each of the first `max_columns` numeric columns.
///
/// Numeric columns with no non-missing value are counted against `max_columns` but produce no
/// file. Paths are returned in column order.
pub fn write_histograms(
    table: &Table,
    summary: &DatasetSummary,
    max_columns: usize,
    out_dir: &Path,
) -> EdaResult<Vec<PathBuf>> {
    let mut used = HashSet::new();
    let mut paths = Vec::new();

    for column in summary.columns.iter().filter(|c| c.is_numeric()).take(max_columns) {
        let values: Vec<f64> = match table.column(&column.name) {
            Some(col) => col.present().filter_map(|v| v.as_f64()).collect(),
            None => continue,
        };
        if values.is_empty() {
            continue;
        }

        let stem = unique_file_stem(&column.name, &mut used);
        let path = out_dir.join(format!("hist_{stem}.svg"));
        draw_histogram(&path, &column.name, &values)?;
        paths.push(path);
    }
    Ok(paths)
}

fn draw_histogram(path: &Path, name: &str, values: &[f64]) -> EdaResult<()> {
    let ((lo, hi), counts) = histogram_bins(values, HIST_BINS);
    let width = (hi - lo) / counts.len() as f64;
    let top = counts.iter().copied().max().unwrap_or(0) + 1;

    let root = SVGBackend::new(path, HIST_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Histogram: {name}"), ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0u32..top)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(name)
        .y_desc("count")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(counts.iter().enumerate().filter(|(_, c)| **c > 0).map(|(i, &count)| {
            let x0 = lo + i as f64 * width;
            Rectangle::new([(x0, 0), (x0 + width, count)], BAR_COLOR.filled())
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    tracing::debug!(path = %path.display(), column = name, "histogram written");
    Ok(())
}

/// Label of the cell centered on integer position `x`, or an empty string between cells.
fn label_at(names: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    names.get(i as usize).cloned().unwrap_or_default()
}

/// Write a rows x columns map of missing cells. Row 0 is at the top.
///
/// Does nothing and returns `false` for a table with no rows or no columns.
pub fn write_missing_matrix(table: &Table, path: &Path) -> EdaResult<bool> {
    let n_rows = table.row_count();
    let n_cols = table.column_count();
    if n_rows == 0 || n_cols == 0 {
        return Ok(false);
    }
    let names: Vec<String> = table.column_names().map(str::to_owned).collect();

    let root = SVGBackend::new(path, MATRIX_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Missing values (dark: missing)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..n_cols as f64 - 0.5, 0.0..n_rows as f64)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n_cols)
        .x_label_formatter(&|x| label_at(&names, *x))
        .y_label_formatter(&|y| format!("{}", (n_rows as f64 - y).round() as i64))
        .y_desc("row")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series((0..n_cols).map(|c| {
            let x = c as f64;
            Rectangle::new([(x - 0.5, 0.0), (x + 0.5, n_rows as f64)], PRESENT_COLOR.filled())
        }))
        .map_err(plot_err)?;

    let missing = table.columns().iter().enumerate().flat_map(|(c, col)| {
        col.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_missing())
            .map(move |(r, _)| (c, r))
    });
    chart
        .draw_series(missing.map(|(c, r)| {
            let x = c as f64;
            let y = (n_rows - r) as f64;
            Rectangle::new([(x - 0.5, y - 1.0), (x + 0.5, y)], MISSING_COLOR.filled())
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    tracing::debug!(path = %path.display(), rows = n_rows, columns = n_cols, "missing matrix written");
    Ok(true)
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Diverging color for a correlation in [-1, 1]; grey when undefined.
pub fn correlation_color(value: Option<f64>) -> RGBColor {
    let Some(r) = value else {
        return UNDEFINED_COLOR;
    };
    let r = r.clamp(-1.0, 1.0);
    let (end, t) = if r < 0.0 {
        (NEGATIVE_COLOR, -r)
    } else {
        (POSITIVE_COLOR, r)
    };
    RGBColor(lerp(255, end.0, t), lerp(255, end.1, t), lerp(255, end.2, t))
}

/// Write the correlation heatmap. Undefined cells are grey.
///
/// Does nothing and returns `false` for an empty matrix.
pub fn write_correlation_heatmap(matrix: &CorrelationMatrix, path: &Path) -> EdaResult<bool> {
    if matrix.is_empty() {
        return Ok(false);
    }
    let names = matrix.columns();
    let n = names.len();
    // row 0 is drawn at the top
    let reversed: Vec<String> = names.iter().rev().cloned().collect();

    let root = SVGBackend::new(path, HEATMAP_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation (Pearson, grey: undefined)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(120)
        .build_cartesian_2d(-0.5..n as f64 - 0.5, -0.5..n as f64 - 0.5)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|x| label_at(names, *x))
        .y_label_formatter(&|y| label_at(&reversed, *y))
        .draw()
        .map_err(plot_err)?;

    let cells = matrix.values().iter().enumerate().flat_map(|(i, row)| {
        row.iter().enumerate().map(move |(j, v)| (i, j, *v))
    });
    chart
        .draw_series(cells.map(|(i, j, v)| {
            let x = j as f64;
            let y = (n - 1 - i) as f64;
            Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], correlation_color(v).filled())
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    tracing::debug!(path = %path.display(), columns = n, "correlation heatmap written");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{correlation_color, histogram_bins, label_at, UNDEFINED_COLOR};
    use plotters::style::RGBColor;

    #[test]
    fn bins_cover_min_and_max() {
        let ((lo, hi), counts) = histogram_bins(&[0.0, 1.0, 2.0, 10.0], 5);
        assert_eq!((lo, hi), (0.0, 10.0));
        assert_eq!(counts, vec![2, 1, 0, 0, 1]);
        assert_eq!(counts.iter().sum::<u32>(), 4);
    }

    #[test]
    fn single_value_gets_a_unit_range() {
        let ((lo, hi), counts) = histogram_bins(&[3.0, 3.0], 4);
        assert_eq!((lo, hi), (2.5, 3.5));
        assert_eq!(counts.iter().sum::<u32>(), 2);
    }

    #[test]
    fn undefined_correlation_is_grey() {
        assert_eq!(correlation_color(None), UNDEFINED_COLOR);
        assert_eq!(correlation_color(Some(0.0)), RGBColor(255, 255, 255));
        assert_ne!(correlation_color(Some(1.0)), correlation_color(Some(-1.0)));
        assert_ne!(correlation_color(Some(0.0)), UNDEFINED_COLOR);
    }

    #[test]
    fn labels_only_at_cell_centers() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(label_at(&names, 1.0), "b");
        assert_eq!(label_at(&names, 0.5), "");
        assert_eq!(label_at(&names, -1.0), "");
        assert_eq!(label_at(&names, 2.0), "");
    }
}
