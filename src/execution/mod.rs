//! One-call orchestration of the analytical core.
//!
//! This module sits "above" [`crate::profiling`] and provides:
//!
//! - a single [`analyze`] call producing every result object as an [`EdaReport`]
//! - optional parallel execution of the independent components on a rayon pool
//! - observer hooks reporting per-stage timings
//!
//! Column kinds are classified once and shared by all components. Column profiling,
//! missingness, correlation and top categories are independent; the summary is assembled
//! after profiling, and quality flags are derived last.

mod observer;

use std::sync::Arc;
use std::time::Instant;

use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use serde::Serialize;

use crate::error::{EdaError, EdaResult};
use crate::profiling::{
    classify_table, correlation_matrix_with_kinds, missing_table, profile_columns_with_kinds,
    quality_flags_with_thresholds, top_categories_with_kinds, CorrelationMatrix, DatasetSummary, MissingTable,
    QualityFlags, QualityThresholds, TopCategoriesTable,
};
use crate::types::Table;

pub use observer::{AnalysisEvent, AnalysisObserver, Stage, TracingAnalysisObserver};

/// Configuration for [`analyze`] and [`AnalysisEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Values kept per categorical column.
    pub top_k: usize,
    /// Categorical columns profiled for top values.
    pub max_category_columns: usize,
    /// Quality heuristic thresholds.
    pub thresholds: QualityThresholds,
    /// Run the independent components concurrently.
    pub parallel: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_category_columns: 5,
            thresholds: QualityThresholds::default(),
            parallel: true,
        }
    }
}

/// Every result object computed for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdaReport {
    pub summary: DatasetSummary,
    pub missing: MissingTable,
    pub correlation: CorrelationMatrix,
    pub top_categories: TopCategoriesTable,
    pub quality: QualityFlags,
}

/// Analyze `table` with `options` on the global rayon pool.
///
/// ```rust
/// use eda_report::execution::{analyze, AnalysisOptions};
/// use eda_report::types::{Column, Table};
///
/// let table = Table::new(vec![
///     Column::new("x", [1.0, 2.0, 3.0]),
///     Column::new("y", [3.0, 2.0, 1.0]),
/// ])
/// .unwrap();
/// let report = analyze(&table, &AnalysisOptions::default());
/// assert_eq!(report.correlation.get("x", "y"), Some(Some(-1.0)));
/// ```
pub fn analyze(table: &Table, options: &AnalysisOptions) -> EdaReport {
    AnalysisEngine::new(options.clone()).run(table)
}

/// Configurable runner for the analysis pipeline.
pub struct AnalysisEngine {
    pool: Option<ThreadPool>,
    opts: AnalysisOptions,
    observer: Option<Arc<dyn AnalysisObserver>>,
}

impl AnalysisEngine {
    /// Create an engine using the global rayon pool when `opts.parallel` is set.
    pub fn new(opts: AnalysisOptions) -> Self {
        Self {
            pool: None,
            opts,
            observer: None,
        }
    }

    /// Run on a dedicated pool of `num_threads` workers.
    pub fn with_threads(mut self, num_threads: usize) -> EdaResult<Self> {
        if num_threads == 0 {
            return Err(EdaError::invalid("num_threads must be > 0"));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| EdaError::invalid(format!("failed to build thread pool: {e}")))?;
        self.pool = Some(pool);
        Ok(self)
    }

    /// Attach an observer for stage events.
    pub fn with_observer(mut self, observer: Arc<dyn AnalysisObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.opts
    }

    /// Run the full pipeline over `table`.
    pub fn run(&self, table: &Table) -> EdaReport {
        match &self.pool {
            Some(pool) if self.opts.parallel => pool.install(|| self.run_impl(table)),
            _ => self.run_impl(table),
        }
    }

    fn run_impl(&self, table: &Table) -> EdaReport {
        let start = Instant::now();
        self.emit(AnalysisEvent::RunStarted {
            rows: table.row_count(),
            columns: table.column_count(),
        });

        let kinds = self.stage(Stage::Classify, || classify_table(table));
        let kinds = kinds.as_slice();
        let top_k = self.opts.top_k;
        let max_columns = self.opts.max_category_columns;

        let profile = || self.stage(Stage::ColumnProfile, || profile_columns_with_kinds(table, kinds));
        let missing = || self.stage(Stage::Missingness, || missing_table(table));
        let correlation = || self.stage(Stage::Correlation, || correlation_matrix_with_kinds(table, kinds));
        let categories = || {
            self.stage(Stage::Categories, || {
                top_categories_with_kinds(table, kinds, max_columns, top_k)
            })
        };

        let (columns, missing, correlation, top_categories) = if self.opts.parallel {
            let ((columns, missing), (correlation, top_categories)) =
                rayon::join(|| rayon::join(profile, missing), || rayon::join(correlation, categories));
            (columns, missing, correlation, top_categories)
        } else {
            (profile(), missing(), correlation(), categories())
        };

        let summary = self.stage(Stage::Summary, || DatasetSummary::new(table.row_count(), columns));
        let quality = self.stage(Stage::Quality, || {
            quality_flags_with_thresholds(&summary, &missing, table, &self.opts.thresholds)
        });

        self.emit(AnalysisEvent::RunFinished {
            elapsed: start.elapsed(),
        });

        EdaReport {
            summary,
            missing,
            correlation,
            top_categories,
            quality,
        }
    }

    fn stage<T>(&self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        self.emit(AnalysisEvent::StageStarted { stage });
        let out = f();
        self.emit(AnalysisEvent::StageFinished {
            stage,
            elapsed: start.elapsed(),
        });
        out
    }

    fn emit(&self, event: AnalysisEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}
