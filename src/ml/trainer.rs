// ============================================================
// Layer 5 — Trainer (ordinary least squares)
// ============================================================
// Fits   avg_score ≈ b0 + b1·math + b2·reading + b3·writing
// by minimising squared error on the training partition.
//
// Steps:
//   1. Make sure the target column exists (canonical formula)
//   2. Check the configured features: non-empty, numeric
//   3. Seeded 80/20 split of row indices
//   4. Centre X and y on the training means, then solve the
//      normal equations  (XᵀX) b = Xᵀy  with ndarray
//   5. intercept = ȳ − Σ b_j · x̄_j
//   6. Score the holdout rows (MSE, RMSE, R²)
//
// Centring removes the intercept column from the system, which
// keeps XᵀX small (one row per feature) and better conditioned.
// The solve is Gaussian elimination with partial pivoting; a
// direction with no variance (a constant or duplicated feature)
// gets a zero coefficient instead of failing, which still
// minimises the squared error.
//
// Every step is a fixed sequence of floating point operations,
// so a fixed seed and dataset reproduce the same coefficients
// bit for bit.

use ndarray::{Array1, Array2};

use crate::application::config::PipelineConfig;
use crate::data::features::ensure_target;
use crate::data::splitter::split_train_test;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::table::Table;
use crate::domain::traits::Regressor;
use crate::infra::metrics::{HoldoutMetrics, MetricsLogger};
use crate::infra::model_store::ModelStore;
use crate::ml::model::LinearModel;

/// What a training run did, for logging and the metrics CSV
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub n_train: usize,
    pub n_test:  usize,
    /// None when the holdout is empty
    pub holdout: Option<HoldoutMetrics>,
}

pub struct Trainer<'a> {
    config: &'a PipelineConfig,
}

impl<'a> Trainer<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Fit, then persist the model to `store` (overwriting any previous
    /// one) and append the holdout metrics next to it. Nothing is
    /// written if fitting fails.
    pub fn train(
        &self,
        table: Table,
        store: &ModelStore,
    ) -> PipelineResult<(LinearModel, TrainReport)> {
        let (model, report) = self.fit(table)?;

        store.save(&model)?;

        match MetricsLogger::new(self.config.model_dir()).and_then(|log| log.log(&report)) {
            Ok(()) => {}
            // the model is already saved; a metrics failure is not fatal
            Err(e) => tracing::warn!("Could not record training metrics: {}", e),
        }

        Ok((model, report))
    }

    /// Fit without touching the filesystem
    pub fn fit(&self, table: Table) -> PipelineResult<(LinearModel, TrainReport)> {
        let cfg    = self.config;
        let table  = ensure_target(table, &cfg.target)?;
        let target = table.numbers(&cfg.target)?;

        let features: Vec<String> = cfg
            .features
            .iter()
            .filter(|f| **f != cfg.target)
            .cloned()
            .collect();
        if features.is_empty() {
            return Err(PipelineError::Training("feature set is empty".to_string()));
        }

        let mut columns = Vec::with_capacity(features.len());
        for name in &features {
            let column = table
                .column(name)
                .filter(|c| c.is_numeric())
                .ok_or_else(|| {
                    PipelineError::Training(format!("feature '{name}' is not a numeric column"))
                })?;
            columns.push(column.to_numbers().map_err(|_| {
                PipelineError::Training(format!("feature '{name}' has missing values; clean first"))
            })?);
        }

        let n_rows = table.n_rows();
        if n_rows < 2 {
            return Err(PipelineError::Training(format!(
                "need at least 2 rows to train, got {n_rows}"
            )));
        }

        // ── Split ─────────────────────────────────────────────────────────────
        let rows: Vec<usize> = (0..n_rows).collect();
        let (train_rows, test_rows) = split_train_test(rows, cfg.test_fraction, cfg.seed);
        if train_rows.is_empty() {
            return Err(PipelineError::Training("training partition is empty".to_string()));
        }
        tracing::info!(
            "Training on {} rows, holding out {} (seed {})",
            train_rows.len(),
            test_rows.len(),
            cfg.seed
        );

        // ── Fit ───────────────────────────────────────────────────────────────
        let x_train = design_matrix(&columns, &train_rows);
        let y_train = Array1::from_iter(train_rows.iter().map(|&r| target[r]));
        let (intercept, coefficients) = fit_least_squares(&x_train, &y_train);

        let model = LinearModel::new(features, cfg.target.clone(), intercept, coefficients);
        tracing::info!(
            "Model trained: intercept={:.6}, coefficients={:?}",
            model.intercept,
            model.coefficients
        );

        // ── Holdout ───────────────────────────────────────────────────────────
        let holdout = if test_rows.is_empty() {
            None
        } else {
            let x_test = design_matrix(&columns, &test_rows);
            let predicted = x_test
                .rows()
                .into_iter()
                .map(|row| model.predict_row(&row.to_vec()))
                .collect::<PipelineResult<Vec<f64>>>()?;
            let actual: Vec<f64> = test_rows.iter().map(|&r| target[r]).collect();
            HoldoutMetrics::compute(&actual, &predicted)
        };
        if let Some(m) = &holdout {
            tracing::info!("Holdout: mse={:.6}, rmse={:.6}, r2={:.6}", m.mse, m.rmse, m.r2);
        }

        let report = TrainReport { n_train: train_rows.len(), n_test: test_rows.len(), holdout };
        Ok((model, report))
    }
}

/// rows × features matrix for the given row indices
fn design_matrix(columns: &[Vec<f64>], rows: &[usize]) -> Array2<f64> {
    Array2::from_shape_fn((rows.len(), columns.len()), |(i, j)| columns[j][rows[i]])
}

/// (intercept, coefficients) minimising ‖y − b0 − X b‖²
fn fit_least_squares(x: &Array2<f64>, y: &Array1<f64>) -> (f64, Vec<f64>) {
    let n      = x.nrows() as f64;
    let x_mean = x.sum_axis(ndarray::Axis(0)) / n;
    let y_mean = y.sum() / n;

    let xc = x - &x_mean;
    let yc = y - y_mean;

    let xtx = xc.t().dot(&xc);
    let xty = xc.t().dot(&yc);
    let beta = solve_normal_equations(xtx, xty);

    let intercept = y_mean - x_mean.dot(&beta);
    (intercept, beta.to_vec())
}

/// Solve A·x = b for symmetric positive semi-definite A.
/// Columns without a usable pivot are left at zero.
fn solve_normal_equations(mut a: Array2<f64>, mut b: Array1<f64>) -> Array1<f64> {
    let p = b.len();
    let scale = (0..p).map(|i| a[[i, i]].abs()).fold(0.0, f64::max).max(1.0);
    let tol   = scale * 1e-12 * p.max(1) as f64;

    let mut pivots: Vec<usize> = Vec::with_capacity(p);
    let mut row = 0;
    for col in 0..p {
        if row == p {
            break;
        }
        let (best, best_abs) = (row..p)
            .map(|r| (r, a[[r, col]].abs()))
            .fold((row, -1.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
        if best_abs <= tol {
            tracing::debug!("Feature {} has no independent variance, coefficient set to 0", col);
            continue;
        }

        if best != row {
            for c in 0..p {
                a.swap([best, c], [row, c]);
            }
            b.swap(best, row);
        }

        for r in (row + 1)..p {
            let factor = a[[r, col]] / a[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for c in col..p {
                a[[r, c]] -= factor * a[[row, c]];
            }
            b[r] -= factor * b[row];
        }

        pivots.push(col);
        row += 1;
    }

    let mut x = Array1::<f64>::zeros(p);
    for (r, &col) in pivots.iter().enumerate().rev() {
        let mut s = b[r];
        for c in (col + 1)..p {
            s -= a[[r, c]] * x[c];
        }
        x[col] = s / a[[r, col]];
    }
    x
}
