// ============================================================
// Layer 3 — Record Table
// ============================================================
// The in-memory dataset: an ordered list of named columns,
// all of the same length. Row `i` is the i-th value of every
// column.
//
// Columns are stored column-major because every stage of the
// pipeline works a column at a time (impute a column, add a
// derived column, read a feature column).
//
// A column's kind is not stored, it is derived from its values:
//   - every present value a number → Numeric
//   - every present value text     → Categorical
//   - no present values            → unknown (None)

use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};

/// A single cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name:   String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self { name: name.into(), values }
    }

    /// Convenience constructor for a fully populated numeric column
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, values.into_iter().map(Value::Number).collect())
    }

    /// Convenience constructor for a fully populated text column
    pub fn categorical<S: Into<String>>(
        name:   impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(name, values.into_iter().map(|s| Value::Text(s.into())).collect())
    }

    /// Derived kind, None when the column holds no present value
    /// (or mixes numbers and text, which the loader never produces).
    pub fn kind(&self) -> Option<ColumnKind> {
        let mut kind = None;
        for v in &self.values {
            let this = match v {
                Value::Number(_) => ColumnKind::Numeric,
                Value::Text(_)   => ColumnKind::Categorical,
                Value::Missing   => continue,
            };
            match kind {
                None                    => kind = Some(this),
                Some(k) if k != this    => return None,
                Some(_)                 => {}
            }
        }
        kind
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == Some(ColumnKind::Numeric)
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Present numeric values, skipping missing cells
    pub fn present_numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_number).collect()
    }

    /// All values as numbers. Fails if any cell is missing or text,
    /// so only call this after cleaning.
    pub fn to_numbers(&self) -> PipelineResult<Vec<f64>> {
        self.values
            .iter()
            .map(|v| {
                v.as_number().ok_or_else(|| PipelineError::SchemaMismatch {
                    column: self.name.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns. All columns must have the same length
    /// and distinct names.
    pub fn from_columns(columns: Vec<Column>) -> PipelineResult<Self> {
        let mut table = Self::new();
        for c in columns {
            table.push_column(c)?;
        }
        Ok(table)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Append a column at the end of the table
    pub fn push_column(&mut self, column: Column) -> PipelineResult<()> {
        if self.has_column(&column.name) {
            return Err(PipelineError::SchemaMismatch { column: column.name });
        }
        if !self.columns.is_empty() && column.values.len() != self.n_rows() {
            return Err(PipelineError::SchemaMismatch { column: column.name });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Rename a column in place. Returns false if `from` does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.name == from) {
            Some(c) => {
                c.name = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Fully populated numeric column by name
    pub fn numbers(&self, name: &str) -> PipelineResult<Vec<f64>> {
        self.column(name)
            .ok_or_else(|| PipelineError::SchemaMismatch { column: name.to_string() })?
            .to_numbers()
    }

    /// Values of one row, in column order
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_derived_from_present_values() {
        let c = Column::new("math", vec![Value::Missing, Value::Number(3.0)]);
        assert_eq!(c.kind(), Some(ColumnKind::Numeric));

        let c = Column::new("lunch", vec![Value::Text("standard".into()), Value::Missing]);
        assert_eq!(c.kind(), Some(ColumnKind::Categorical));

        let c = Column::new("empty", vec![Value::Missing, Value::Missing]);
        assert_eq!(c.kind(), None);
    }

    #[test]
    fn test_push_column_rejects_length_mismatch() {
        let mut t = Table::new();
        t.push_column(Column::numeric("a", [1.0, 2.0])).unwrap();
        let err = t.push_column(Column::numeric("b", [1.0])).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaMismatch { column } if column == "b"));
    }

    #[test]
    fn test_push_column_rejects_duplicate_name() {
        let mut t = Table::new();
        t.push_column(Column::numeric("a", [1.0])).unwrap();
        assert!(t.push_column(Column::numeric("a", [2.0])).is_err());
    }

    #[test]
    fn test_rename_and_lookup() {
        let mut t = Table::from_columns(vec![Column::numeric("math score", [70.0])]).unwrap();
        assert!(t.rename_column("math score", "math_score"));
        assert!(!t.rename_column("math score", "x"));
        assert_eq!(t.numbers("math_score").unwrap(), vec![70.0]);
    }

    #[test]
    fn test_numbers_fails_on_missing_cell() {
        let t = Table::from_columns(vec![Column::new("a", vec![Value::Number(1.0), Value::Missing])])
            .unwrap();
        assert!(t.numbers("a").is_err());
        assert_eq!(t.total_missing(), 1);
    }
}
