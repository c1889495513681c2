// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw CSV file to the engineered table the
// trainer consumes:
//
//   StudentsPerformance.csv
//       │
//       ▼
//   CsvLoader        → reads the file into a typed Table
//       │
//       ▼
//   Cleaner          → fills missing cells (median / mode)
//       │
//       ▼
//   FeatureEngineer  → canonical names, total_score, avg_score
//       │
//       ▼
//   split_train_test → seeded training / holdout partition
//
// Each module does exactly one step and is tested on its own.

/// Loads a delimited file into a Table using the csv crate
pub mod loader;

/// Imputes missing values per column
pub mod cleaner;

/// Canonical column names and derived score columns
pub mod features;

/// Seeded shuffle and train/holdout split
pub mod splitter;

/// Median, mode, quantiles, correlation, histograms
pub mod stats;
