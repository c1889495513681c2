// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to the data and ML layers through
// these traits only, so a different source (another file format,
// an in-memory fixture in tests) or a different model can be
// plugged in without touching the pipeline.

use crate::domain::error::PipelineResult;
use crate::domain::feature_vector::FeatureVector;
use crate::domain::table::Table;

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Anything that can produce the raw record table.
///
/// Implementations:
///   - CsvLoader      → reads a delimited file from disk
///   - Table (itself) → an already-built table, handy in tests
pub trait TableSource {
    /// Load the table exactly as stored, without filtering.
    fn load(&self) -> PipelineResult<Table>;

    /// Human-readable origin, used in log lines
    fn describe(&self) -> String;
}

impl TableSource for Table {
    fn load(&self) -> PipelineResult<Table> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.n_rows())
    }
}

// ─── Regressor ────────────────────────────────────────────────────────────────
/// A fitted model that maps an ordered feature slice to one number.
///
/// Implementations:
///   - LinearModel → ordinary least squares with intercept
pub trait Regressor {
    /// Feature names in the order `predict_row` expects them
    fn feature_names(&self) -> &[String];

    /// Predict from values already ordered like `feature_names()`
    fn predict_row(&self, features: &[f64]) -> PipelineResult<f64>;

    /// Predict from a named vector, dropping entries the model was
    /// not trained on.
    fn predict(&self, input: &FeatureVector) -> PipelineResult<f64> {
        let row = input.aligned_to(self.feature_names())?;
        self.predict_row(&row)
    }
}
