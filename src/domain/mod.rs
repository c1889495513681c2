// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that define what the system
// works with: the record table, the prediction input, the
// error kinds, and the seams between layers.
//
// Rules for this layer:
//   - NO file I/O
//   - NO numeric fitting code
//   - Only structs, enums and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Error kinds shared by every pipeline stage
pub mod error;

/// The in-memory record table (columns of values)
pub mod table;

/// Named input values for a single prediction
pub mod feature_vector;

/// Core abstractions (traits) that other layers implement
pub mod traits;
