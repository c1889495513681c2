// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All fitting and prediction code lives here.
//
//   model.rs     — LinearModel: intercept, coefficients and the
//                  ordered feature names they belong to
//
//   trainer.rs   — Ordinary least squares on the seeded training
//                  partition, holdout scoring, persistence
//
//   predictor.rs — Loads the persisted model and answers
//                  prediction requests
//
// Reference: ndarray documentation (linear algebra on Array2)

/// Linear regression model and its serialised form
pub mod model;

/// Least squares fit, holdout metrics, save
pub mod trainer;

/// Loads a saved model and predicts
pub mod predictor;
