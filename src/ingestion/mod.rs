//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - infers the delimiter from the file extension (or you can override via [`IngestionOptions`])
//! - decodes the file with the requested text encoding
//! - loads it into an in-memory [`crate::types::Table`], inferring column types
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Lower-level functions that work on strings and readers live in [`csv`].

pub mod csv;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{ingest_from_path, DelimitedFormat, IngestionOptions};
