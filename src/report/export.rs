//! CSV exports of the result tables.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EdaResult;
use crate::profiling::summary::format_optional;
use crate::profiling::{CorrelationMatrix, MissingTable, SummaryTable, TopCategoriesTable};

/// Write the flattened summary, one row per column.
pub fn write_summary_csv(table: &SummaryTable, path: &Path) -> EdaResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `column,missing_count,missing_share` rows.
pub fn write_missing_csv(missing: &MissingTable, path: &Path) -> EdaResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for entry in missing.entries() {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the square matrix with column names as both header and first field.
pub fn write_correlation_csv(matrix: &CorrelationMatrix, path: &Path) -> EdaResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec![String::new()];
    header.extend(matrix.columns().iter().cloned());
    wtr.write_record(&header)?;

    for (name, row) in matrix.columns().iter().zip(matrix.values()) {
        let mut record = vec![name.clone()];
        record.extend(row.iter().map(|v| format_optional(*v)));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one `value,count` file per column into `dir`, returning the paths in column order.
pub fn write_top_categories(top: &TopCategoriesTable, dir: &Path) -> EdaResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut used = HashSet::new();
    let mut paths = Vec::with_capacity(top.len());
    for entry in top.columns() {
        let stem = unique_file_stem(&entry.column, &mut used);
        let path = dir.join(format!("{stem}.csv"));
        let mut wtr = csv::Writer::from_path(&path)?;
        wtr.write_record(["value", "count"])?;
        for c in &entry.values {
            wtr.serialize((&c.value, c.count))?;
        }
        wtr.flush()?;
        paths.push(path);
    }
    Ok(paths)
}

/// [`sanitize_file_stem`], suffixed with `_2`, `_3`, ... until it is not in `used`.
pub(crate) fn unique_file_stem(name: &str, used: &mut HashSet<String>) -> String {
    let base = sanitize_file_stem(name);
    let mut stem = base.clone();
    let mut n = 1;
    while !used.insert(stem.clone()) {
        n += 1;
        stem = format!("{base}_{n}");
    }
    stem
}

/// Map a column name to a file stem made of ASCII letters, digits, `-` and `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.chars().all(|c| c == '_') {
        "column".to_string()
    } else {
        stem
    }
}
