use std::fmt;
use std::time::Duration;

/// Pipeline stages run by [`super::AnalysisEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Classify,
    ColumnProfile,
    Missingness,
    Correlation,
    Categories,
    Summary,
    Quality,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Classify => "classify",
            Self::ColumnProfile => "column_profile",
            Self::Missingness => "missingness",
            Self::Correlation => "correlation",
            Self::Categories => "categories",
            Self::Summary => "summary",
            Self::Quality => "quality",
        };
        f.write_str(name)
    }
}

/// Events emitted by the engine.
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    RunStarted { rows: usize, columns: usize },
    StageStarted { stage: Stage },
    StageFinished { stage: Stage, elapsed: Duration },
    RunFinished { elapsed: Duration },
}

/// Observer hook for analysis events.
///
/// With parallel execution, events from independent stages may arrive interleaved and from
/// different threads.
pub trait AnalysisObserver: Send + Sync {
    fn on_event(&self, event: &AnalysisEvent);
}

/// Logs analysis events at debug level through `tracing`.
#[derive(Debug, Default)]
pub struct TracingAnalysisObserver;

impl AnalysisObserver for TracingAnalysisObserver {
    fn on_event(&self, event: &AnalysisEvent) {
        match event {
            AnalysisEvent::RunStarted { rows, columns } => {
                tracing::debug!(rows, columns, "analysis started");
            }
            AnalysisEvent::StageStarted { stage } => {
                tracing::trace!(%stage, "stage started");
            }
            AnalysisEvent::StageFinished { stage, elapsed } => {
                tracing::debug!(%stage, ?elapsed, "stage finished");
            }
            AnalysisEvent::RunFinished { elapsed } => {
                tracing::debug!(?elapsed, "analysis finished");
            }
        }
    }
}
