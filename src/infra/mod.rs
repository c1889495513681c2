// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the model directory on disk:
//
//   model_store.rs — Saving and loading the fitted model as JSON.
//                    Missing file → ModelNotFound, so prediction
//                    tells the user to train first.
//
//   metrics.rs     — Holdout metrics (MSE, RMSE, R²) and a CSV
//                    log with one row per training run.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

/// Model persistence
pub mod model_store;

/// Holdout metrics and their CSV log
pub mod metrics;
