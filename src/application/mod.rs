// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training, predicting, describing the data).
//
// Rules for this layer:
//   - No fitting math here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination and error context
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// Explicit run configuration shared by every stage
pub mod config;

/// Typestate pipeline: Unloaded → … → PredictionReady
pub mod pipeline;

/// The training workflow
pub mod train_use_case;

/// The prediction workflow
pub mod predict_use_case;

/// The exploratory statistics workflow
pub mod describe_use_case;
