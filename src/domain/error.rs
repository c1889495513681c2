// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every stage of the pipeline fails with one of these kinds.
// Stages are all-or-nothing: an error aborts the stage and is
// handed straight back to the caller, never retried.
//
// The application layer wraps these in anyhow::Error with extra
// context, so callers that care about the kind can still
// downcast_ref::<PipelineError>().

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source table could not be read or parsed
    #[error("dataset '{path}' is unavailable: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    /// A column has no present values to impute from
    #[error("column '{column}' has no values to impute from")]
    InsufficientData { column: String },

    /// A subject column the feature step needs is absent or not numeric
    #[error("column '{column}' is missing or not numeric")]
    SchemaMismatch { column: String },

    /// Fitting was impossible (no features, too few rows, non-numeric feature)
    #[error("training failed: {0}")]
    Training(String),

    /// Prediction was requested before any model was persisted
    #[error("no trained model at '{path}'. Run 'train' first")]
    ModelNotFound { path: PathBuf },

    /// A persisted model exists but cannot be used
    #[error("model at '{path}' is invalid: {reason}")]
    InvalidModel { path: PathBuf, reason: String },

    /// A prediction input is missing a feature or out of range
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
