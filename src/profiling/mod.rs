//! The analytical core: turns a [`crate::types::Table`] into summaries, tables and flags.
//!
//! Every function here is a pure computation over an immutable table. Nothing performs I/O,
//! and nothing fails on an empty table: empty inputs produce empty or neutral results, and
//! statistics that cannot be computed are `None`.
//!
//! Components:
//!
//! - [`classify()`]: semantic type of a column ([`crate::types::DtypeKind`])
//! - [`summarize()`]: per-column statistics assembled into a [`DatasetSummary`]
//! - [`missing_table()`]: missing counts/shares for columns with missing values
//! - [`correlation_matrix()`]: pairwise Pearson correlation of numeric columns
//! - [`top_categories()`]: top-K value counts of categorical columns
//! - [`quality_flags()`]: threshold heuristics and an aggregate quality score
//! - [`flatten_for_display()`]: string rows for tabular display/export
//!
//! Each `*_with_kinds` variant takes kinds from [`classify_table()`] so callers running
//! several components classify each column once.
//!
//! ## Example
//!
//! ```rust
//! use eda_report::profiling::{missing_table, quality_flags, summarize, top_categories};
//! use eda_report::types::{Column, Table};
//!
//! let table = Table::new(vec![
//!     Column::new("age", [Some(10_i64), Some(20), Some(30), None]),
//!     Column::new("height", [140_i64, 150, 160, 170]),
//!     Column::new("city", [Some("A"), Some("B"), Some("A"), None]),
//! ])
//! .unwrap();
//!
//! let summary = summarize(&table);
//! assert_eq!((summary.n_rows, summary.n_cols), (4, 3));
//!
//! let missing = missing_table(&table);
//! assert_eq!(missing.get("age").unwrap().missing_count, 1);
//!
//! let top = top_categories(&table, 5, 2);
//! assert_eq!(top.get("city").unwrap()[0].value, "A");
//!
//! let flags = quality_flags(&summary, &missing, &table);
//! assert!((0.0..=1.0).contains(&flags.quality_score));
//! ```

pub mod categories;
pub mod classify;
pub mod column;
pub mod correlation;
pub mod missing;
pub mod quality;
pub mod summary;

pub use categories::{top_categories, top_categories_with_kinds, CategoryCount, TopCategories, TopCategoriesTable};
pub use classify::{classify, classify_table};
pub use column::{profile_columns, profile_columns_with_kinds, ColumnSummary, FrequencyStats, NumericStats};
pub use correlation::{correlation_matrix, correlation_matrix_with_kinds, CorrelationMatrix};
pub use missing::{missing_table, MissingEntry, MissingTable};
pub use quality::{quality_flags, quality_flags_with_thresholds, QualityFlags, QualityThresholds, EMPTY_TABLE_SCORE};
pub use summary::{
    flatten_for_display, summarize, summarize_with_kinds, DatasetSummary, SummaryTable, DISPLAY_COLUMNS,
    NOT_APPLICABLE,
};
