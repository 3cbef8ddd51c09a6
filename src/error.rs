use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type EdaResult<T> = Result<T, EdaError>;

/// Error type returned by table construction, ingestion and report writing.
///
/// The analytical core never fails on a well-formed [`crate::types::Table`]: empty tables and
/// undefined statistics are represented in the results, not raised as errors.
#[derive(Debug, Error)]
pub enum EdaError {
    /// Underlying I/O error (e.g. permission denied, disk full).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input file does not exist.
    #[error("file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// Columns (or rows) of the table disagree on their length.
    #[error("inconsistent table shape: {message}")]
    InputShape { message: String },

    /// Two columns share the same name.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    /// The requested text encoding label is not known.
    #[error("unknown encoding '{label}'")]
    UnknownEncoding { label: String },

    /// The input bytes are not valid in the requested encoding.
    #[error("failed to decode input as {encoding}")]
    Decode { encoding: String },

    /// A chart could not be rendered or saved.
    #[error("plot error: {message}")]
    Plot { message: String },

    /// The caller passed options or data that cannot be used.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl EdaError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::InputShape {
            message: message.into(),
        }
    }

    pub(crate) fn plot(message: impl Into<String>) -> Self {
        Self::Plot {
            message: message.into(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
