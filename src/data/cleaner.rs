// ============================================================
// Layer 4 — Cleaner (missing value imputation)
// ============================================================
// Fills every missing cell from a statistic of its own column:
//   - numeric column     → median of the present values
//   - categorical column → most frequent present value
//
// A column with no present value at all has neither a median
// nor a mode, so cleaning fails with InsufficientData rather
// than inventing a value.
//
// Statistics are computed from the column as loaded, before any
// cell is filled, so the order of filling never matters.

use crate::data::stats;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::table::{Column, ColumnKind, Table, Value};

pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    /// Return a fully populated copy of `table`
    pub fn clean(&self, mut table: Table) -> PipelineResult<Table> {
        let missing: Vec<(&str, usize)> = table
            .columns()
            .iter()
            .map(|c| (c.name.as_str(), c.missing_count()))
            .collect();
        tracing::debug!("Missing values before cleaning: {:?}", missing);

        let before = table.total_missing();
        if before == 0 {
            tracing::info!("No missing values, nothing to clean");
            return Ok(table);
        }

        // Compute every fill value first so a failure leaves nothing half-done
        let fills = table
            .columns()
            .iter()
            .map(fill_value)
            .collect::<PipelineResult<Vec<Value>>>()?;

        for (column, fill) in table.columns_mut().iter_mut().zip(fills) {
            for v in column.values.iter_mut().filter(|v| v.is_missing()) {
                *v = fill.clone();
            }
        }

        tracing::info!("Filled {} missing values", before);
        Ok(table)
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// The value used for this column's missing cells
fn fill_value(column: &Column) -> PipelineResult<Value> {
    let insufficient = || PipelineError::InsufficientData { column: column.name.clone() };

    match column.kind().ok_or_else(insufficient)? {
        ColumnKind::Numeric => {
            let median = stats::median(&column.present_numbers()).ok_or_else(insufficient)?;
            Ok(Value::Number(median))
        }
        ColumnKind::Categorical => {
            let mode = stats::mode(column.values.iter().filter_map(Value::as_text))
                .ok_or_else(insufficient)?;
            Ok(Value::Text(mode.to_string()))
        }
    }
}
