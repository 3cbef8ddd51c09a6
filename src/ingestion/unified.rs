//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which loads a delimited file into an
//! in-memory [`crate::types::Table`].
//!
//! - If [`IngestionOptions::delimiter`] is `None`, the delimiter is inferred from the file
//!   extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{EdaError, EdaResult};
use crate::types::{Column, Table};

use super::csv::{ingest_csv_from_path, CsvOptions, DEFAULT_MISSING_MARKERS};
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Supported delimited-text flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimitedFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// Any other single-byte delimiter chosen by the caller.
    Custom(u8),
}

impl DelimitedFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }

    /// Format for an explicit delimiter byte.
    pub fn from_delimiter(delimiter: u8) -> Self {
        match delimiter {
            b',' => Self::Csv,
            b'\t' => Self::Tsv,
            other => Self::Custom(other),
        }
    }

    /// Field delimiter byte.
    pub fn delimiter(&self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
            Self::Custom(d) => *d,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, infer the delimiter from the file extension.
    pub delimiter: Option<u8>,
    /// WHATWG encoding label of the file.
    pub encoding: String,
    /// Cell texts treated as missing in addition to empty cells.
    pub missing_markers: Vec<String>,
    /// Convert columns to typed values where every cell allows it.
    pub infer_types: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("delimiter", &self.delimiter.map(char::from))
            .field("encoding", &self.encoding)
            .field("missing_markers", &self.missing_markers)
            .field("infer_types", &self.infer_types)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: "utf-8".to_string(),
            missing_markers: DEFAULT_MISSING_MARKERS.iter().map(|s| s.to_string()).collect(),
            infer_types: true,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

impl IngestionOptions {
    /// Parse a `--sep` style argument: a single character, or `\t`/`tab` for tab.
    pub fn parse_delimiter(sep: &str) -> EdaResult<u8> {
        match sep {
            "\\t" | "tab" | "\t" => Ok(b'\t'),
            s if s.len() == 1 => Ok(s.as_bytes()[0]),
            s => Err(EdaError::invalid(format!(
                "delimiter must be a single ASCII character, got '{s}'"
            ))),
        }
    }
}

/// Unified ingestion entry point for path-based sources.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use eda_report::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), eda_report::EdaError> {
/// // `.csv` selects the comma delimiter.
/// let table = ingest_from_path("people.csv", &IngestionOptions::default())?;
/// println!("rows={} cols={}", table.row_count(), table.column_count());
/// # Ok(())
/// # }
/// ```
///
/// ```no_run
/// use std::sync::Arc;
///
/// use eda_report::ingestion::{ingest_from_path, IngestionOptions, IngestionSeverity, TracingObserver};
///
/// # fn main() -> Result<(), eda_report::EdaError> {
/// let opts = IngestionOptions {
///     delimiter: Some(b';'),
///     encoding: "windows-1251".to_string(),
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: IngestionSeverity::Critical,
///     ..Default::default()
/// };
/// let table = ingest_from_path("export_without_extension", &opts)?;
/// # let _ = table;
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> EdaResult<Table> {
    let path = path.as_ref();
    let format = match options.delimiter {
        Some(d) => DelimitedFormat::from_delimiter(d),
        None => infer_format_from_path(path)?,
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format,
        encoding: options.encoding.clone(),
    };

    let result = if path.is_file() {
        let csv_options = CsvOptions {
            delimiter: format.delimiter(),
            encoding: options.encoding.clone(),
            missing_markers: options.missing_markers.clone(),
            infer_types: options.infer_types,
        };
        ingest_csv_from_path(path, &csv_options)
    } else {
        Err(EdaError::NotFound {
            path: path.to_path_buf(),
        })
    };

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: table.row_count(),
                    columns: table.column_count(),
                    missing_cells: table.columns().iter().map(Column::missing_count).sum(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &EdaError) -> IngestionSeverity {
    match e {
        EdaError::Io(_) | EdaError::NotFound { .. } => IngestionSeverity::Critical,
        EdaError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        _ => IngestionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> EdaResult<DelimitedFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            EdaError::invalid(format!(
                "cannot infer delimiter: path has no extension ({})",
                path.display()
            ))
        })?;

    DelimitedFormat::from_extension(ext).ok_or_else(|| {
        EdaError::invalid(format!(
            "cannot infer delimiter from extension '{ext}' for path ({})",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::{DelimitedFormat, IngestionOptions};

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(DelimitedFormat::from_extension("CSV"), Some(DelimitedFormat::Csv));
        assert_eq!(DelimitedFormat::from_extension("tsv"), Some(DelimitedFormat::Tsv));
        assert_eq!(DelimitedFormat::from_extension("parquet"), None);
    }

    #[test]
    fn delimiter_round_trips_through_format() {
        assert_eq!(DelimitedFormat::from_delimiter(b';').delimiter(), b';');
        assert_eq!(DelimitedFormat::from_delimiter(b'\t'), DelimitedFormat::Tsv);
    }

    #[test]
    fn parse_delimiter_accepts_tab_spellings() {
        assert_eq!(IngestionOptions::parse_delimiter(",").unwrap(), b',');
        assert_eq!(IngestionOptions::parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(IngestionOptions::parse_delimiter("tab").unwrap(), b'\t');
        assert!(IngestionOptions::parse_delimiter(";;").is_err());
        assert!(IngestionOptions::parse_delimiter("é").is_err());
    }
}
