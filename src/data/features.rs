// ============================================================
// Layer 4 — Feature Engineer
// ============================================================
// Brings the subject score columns to their canonical names and
// derives the two aggregate columns:
//
//   "math score"    → math_score
//   "reading score" → reading_score
//   "writing score" → writing_score
//
//   total_score = math_score + reading_score + writing_score
//   avg_score   = total_score / 3
//
// This is the only place avg_score is ever computed. The trainer
// and the describe report call `ensure_target` / `engineer`
// instead of using their own formula.
//
// Running the engineer on an already-engineered table changes
// nothing: renames only apply when the raw name is present and
// the canonical one is not, and derived columns are only added
// when absent.

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::table::{Column, Table};

pub const TOTAL_SCORE: &str = "total_score";
pub const AVG_SCORE:   &str = "avg_score";

/// (raw column name as shipped in the dataset, canonical name)
pub const SUBJECTS: [(&str, &str); 3] = [
    ("math score",    "math_score"),
    ("reading score", "reading_score"),
    ("writing score", "writing_score"),
];

/// Canonical subject names, in model feature order
pub fn subject_columns() -> Vec<String> {
    SUBJECTS.iter().map(|(_, c)| c.to_string()).collect()
}

pub struct FeatureEngineer;

impl FeatureEngineer {
    pub fn new() -> Self {
        Self
    }

    pub fn engineer(&self, mut table: Table) -> PipelineResult<Table> {
        self.normalize_names(&mut table);

        if !table.has_column(TOTAL_SCORE) {
            let total = self.total_scores(&table)?;
            table.push_column(Column::numeric(TOTAL_SCORE, total))?;
            tracing::info!("Added column: {}", TOTAL_SCORE);
        }

        if !table.has_column(AVG_SCORE) {
            let avg = table.numbers(TOTAL_SCORE)?.into_iter().map(|t| t / 3.0);
            table.push_column(Column::numeric(AVG_SCORE, avg))?;
            tracing::info!("Added column: {}", AVG_SCORE);
        }

        Ok(table)
    }

    /// Rename raw subject columns to the canonical snake_case names
    pub fn normalize_names(&self, table: &mut Table) {
        for (raw, canonical) in SUBJECTS {
            if !table.has_column(canonical) && table.rename_column(raw, canonical) {
                tracing::debug!("Renamed column '{}' → '{}'", raw, canonical);
            }
        }
    }

    fn total_scores(&self, table: &Table) -> PipelineResult<Vec<f64>> {
        let mut total = vec![0.0; table.n_rows()];
        for (_, canonical) in SUBJECTS {
            let column = table
                .column(canonical)
                .filter(|c| c.is_numeric() || c.values.is_empty())
                .ok_or_else(|| PipelineError::SchemaMismatch { column: canonical.to_string() })?;
            for (t, v) in total.iter_mut().zip(column.to_numbers()?) {
                *t += v;
            }
        }
        Ok(total)
    }
}

impl Default for FeatureEngineer {
    fn default() -> Self {
        Self::new()
    }
}

/// Make sure `target` exists. Only avg_score can be derived; it goes
/// through the same path as the feature step so both agree. A table
/// without the subject scores to derive it from is a training error.
pub fn ensure_target(table: Table, target: &str) -> PipelineResult<Table> {
    if table.has_column(target) {
        return Ok(table);
    }
    if target == AVG_SCORE {
        tracing::warn!("Target '{}' absent, deriving it from subject scores", target);
        return FeatureEngineer::new().engineer(table).map_err(|e| match e {
            PipelineError::SchemaMismatch { column } => PipelineError::Training(format!(
                "cannot derive '{target}': feature '{column}' is missing or not numeric"
            )),
            other => other,
        });
    }
    Err(PipelineError::Training(format!("target column '{target}' not found")))
}
