// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records holdout metrics to a CSV file after each training run.
//
// Metrics recorded per run:
//   - n_train: rows used to fit
//   - n_test:  rows held out
//   - mse:     mean squared error on the holdout
//   - rmse:    square root of mse, in score points
//   - r2:      coefficient of determination (1.0 = perfect)
//
// Output file: models/metrics.csv
//
// Example CSV output:
//   n_train,n_test,mse,rmse,r2
//   800,200,0.000000,0.000000,1.000000
//
// A run with an empty holdout writes empty metric cells.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::ml::trainer::TrainReport;

const HEADER: &str = "n_train,n_test,mse,rmse,r2";

/// Error measures on the rows the model never saw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldoutMetrics {
    pub mse:  f64,
    pub rmse: f64,
    /// NaN when the holdout target has zero variance
    pub r2:   f64,
}

impl HoldoutMetrics {
    /// None for empty or mismatched inputs
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Option<Self> {
        if actual.is_empty() || actual.len() != predicted.len() {
            return None;
        }
        let n = actual.len() as f64;
        let ss_res: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p) * (a - p)).sum();
        let mean   = actual.iter().sum::<f64>() / n;
        let ss_tot: f64 = actual.iter().map(|a| (a - mean) * (a - mean)).sum();

        let mse = ss_res / n;
        let r2  = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { f64::NAN };
        Some(Self { mse, rmse: mse.sqrt(), r2 })
    }
}

/// Appends one row per training run to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory and the CSV header if they don't exist yet
    pub fn new(dir: impl Into<PathBuf>) -> PipelineResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| PipelineError::io(&dir, e))?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path).map_err(|e| PipelineError::io(&csv_path, e))?;
            writeln!(f, "{HEADER}").map_err(|e| PipelineError::io(&csv_path, e))?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, report: &TrainReport) -> PipelineResult<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .map_err(|e| PipelineError::io(&self.csv_path, e))?;

        let metrics = match &report.holdout {
            Some(m) => format!("{:.6},{:.6},{:.6}", m.mse, m.rmse, m.r2),
            None    => ",,".to_string(),
        };
        writeln!(f, "{},{},{}", report.n_train, report.n_test, metrics)
            .map_err(|e| PipelineError::io(&self.csv_path, e))?;

        tracing::debug!("Logged run metrics to '{}'", self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
