//! `eda-report` is a small exploratory-data-analysis library for in-memory tables.
//!
//! Given a [`types::Table`] (named, ordered, equally long columns of [`types::Value`]s), it
//! computes:
//!
//! - per-column summaries with a semantic type ([`types::DtypeKind`]) and descriptive statistics
//! - a missing-values table
//! - a Pearson correlation matrix of numeric columns
//! - top-K value counts of non-numeric (text, boolean, date/time) columns
//! - threshold-based data-quality flags with an aggregate score in [0, 1]
//! - a flat string projection of the summary for display or CSV export
//!
//! Tables usually come from [`ingestion::ingest_from_path`] (CSV/TSV in any WHATWG encoding)
//! and are analyzed in one call by [`execution::analyze`]. [`report::write_report`] renders
//! the results into a directory of CSV, markdown, JSON and SVG files.
//!
//! ## Quick example
//!
//! ```rust
//! use eda_report::execution::{analyze, AnalysisOptions};
//! use eda_report::profiling::flatten_for_display;
//! use eda_report::types::{Column, Table};
//!
//! # fn main() -> Result<(), eda_report::EdaError> {
//! let table = Table::new(vec![
//!     Column::new("age", [Some(10_i64), Some(20), Some(30), None]),
//!     Column::new("height", [140_i64, 150, 160, 170]),
//!     Column::new("city", [Some("A"), Some("B"), Some("A"), None]),
//! ])?;
//!
//! let report = analyze(&table, &AnalysisOptions::default());
//! assert_eq!(report.missing.get("age").map(|e| e.missing_share), Some(0.25));
//! assert!(report.quality.too_few_rows);
//!
//! println!("{}", flatten_for_display(&report.summary));
//! # Ok(())
//! # }
//! ```
//!
//! ## Loading a file
//!
//! ```no_run
//! use eda_report::ingestion::{ingest_from_path, IngestionOptions};
//!
//! # fn main() -> Result<(), eda_report::EdaError> {
//! let table = ingest_from_path("data.csv", &IngestionOptions::default())?;
//! println!("rows={} cols={}", table.row_count(), table.column_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the in-memory table model
//! - [`profiling`]: the analytical core (pure, no I/O)
//! - [`ingestion`]: delimited-file loading with observers
//! - [`execution`]: one-call orchestration, optionally parallel
//! - [`report`]: report artifacts on disk
//! - [`logging`]: `tracing` subscriber setup for the binary
//! - [`error`]: error types

pub mod error;
pub mod execution;
pub mod ingestion;
pub mod logging;
pub mod profiling;
pub mod report;
pub mod types;

pub use error::{EdaError, EdaResult};
