//! Delimited-text ingestion implementation.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;

use crate::error::{EdaError, EdaResult};
use crate::types::{Column, Table, Value};

/// Cell texts treated as missing in addition to the empty string.
///
/// `-` is not a default marker; add it to [`CsvOptions::missing_markers`] when a file uses it
/// for missing cells.
pub const DEFAULT_MISSING_MARKERS: [&str; 7] = ["NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Options for reading one delimited file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// WHATWG encoding label (`utf-8`, `windows-1251`, `latin1`, ...).
    pub encoding: String,
    /// Trimmed cell texts that become [`Value::Null`]. Empty cells are always missing.
    pub missing_markers: Vec<String>,
    /// Convert each column to `Int64`/`Float64`/`Bool` when every present cell allows it.
    /// Only `true`/`false` (any case) become `Bool`; codes like `Y`/`N` stay text.
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: "utf-8".to_string(),
            missing_markers: DEFAULT_MISSING_MARKERS.iter().map(|s| s.to_string()).collect(),
            infer_types: true,
        }
    }
}

/// Ingest a delimited file into an in-memory [`Table`].
///
/// Rules:
///
/// - The file must have a header row; header names must be unique.
/// - Every record must have as many fields as the header.
/// - Bytes are decoded with `options.encoding` before parsing.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, options: &CsvOptions) -> EdaResult<Table> {
    let bytes = fs::read(path)?;
    let text = decode_bytes(&bytes, &options.encoding)?;
    ingest_csv_from_str(&text, options)
}

/// Ingest delimited text that is already decoded.
pub fn ingest_csv_from_str(input: &str, options: &CsvOptions) -> EdaResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(input.as_bytes());
    ingest_csv_from_reader(&mut rdr, options)
}

/// Ingest from an existing CSV reader.
///
/// The reader should be `flexible` so that ragged rows surface as
/// [`EdaError::InputShape`] with a line number instead of a bare CSV error.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &CsvOptions,
) -> EdaResult<Table> {
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_owned()).collect();

    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result?;
        if record.len() != headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(EdaError::shape(format!(
                "line {line} has {} fields, expected {}",
                record.len(),
                headers.len()
            )));
        }
        for (cells, field) in raw.iter_mut().zip(record.iter()) {
            cells.push(parse_cell(field, &options.missing_markers));
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| {
            let values = if options.infer_types {
                infer_column(cells)
            } else {
                cells.into_iter().map(|c| c.map(Value::Utf8).unwrap_or(Value::Null)).collect()
            };
            Column { name, values }
        })
        .collect();

    Table::new(columns)
}

/// Decode `bytes` using a WHATWG encoding label.
pub fn decode_bytes(bytes: &[u8], label: &str) -> EdaResult<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| EdaError::UnknownEncoding {
        label: label.to_string(),
    })?;
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(EdaError::Decode {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

fn parse_cell(raw: &str, missing_markers: &[String]) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || missing_markers.iter().any(|m| m == trimmed) {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn parse_bool_word(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Narrowest typed representation that fits every present cell of a column.
fn infer_column(cells: Vec<Option<String>>) -> Vec<Value> {
    let present = || cells.iter().flatten();

    if present().all(|s| s.parse::<i64>().is_ok()) {
        return cells
            .iter()
            .map(|c| match c.as_deref().map(str::parse::<i64>) {
                Some(Ok(v)) => Value::Int64(v),
                _ => Value::Null,
            })
            .collect();
    }
    if present().all(|s| s.parse::<f64>().is_ok_and(f64::is_finite)) {
        return cells
            .iter()
            .map(|c| match c.as_deref().map(str::parse::<f64>) {
                Some(Ok(v)) => Value::Float64(v),
                _ => Value::Null,
            })
            .collect();
    }
    if present().all(|s| parse_bool_word(s).is_some()) {
        return cells
            .iter()
            .map(|c| c.as_deref().and_then(parse_bool_word).map(Value::Bool).unwrap_or(Value::Null))
            .collect();
    }
    cells
        .into_iter()
        .map(|c| c.map(Value::Utf8).unwrap_or(Value::Null))
        .collect()
}
