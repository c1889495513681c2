// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads a delimited file (CSV by default) into a Table using the
// csv crate.
//
// The first row is the header. Each column is typed as a whole
// after reading:
//   - every present cell parses as a finite f64 → numeric column
//   - otherwise                                → text column
// Empty cells and NA / NaN / null markers become Value::Missing.
//
// Any read or parse failure (missing file, ragged row, empty
// header) is reported as DataUnavailable. Bad rows are never
// skipped: the table is returned exactly as stored or not at all.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::table::{Column, Table, Value};
use crate::domain::traits::TableSource;

const MISSING_MARKERS: [&str; 4] = ["", "na", "nan", "null"];

/// Loads a table from a delimited text file.
pub struct CsvLoader {
    path:      PathBuf,
    delimiter: u8,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, reason: impl ToString) -> PipelineError {
        PipelineError::DataUnavailable {
            path:   self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl TableSource for CsvLoader {
    fn load(&self) -> PipelineResult<Table> {
        if !self.path.is_file() {
            return Err(self.unavailable("file does not exist"));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.unavailable(e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| self.unavailable(e))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(self.unavailable("missing header row"));
        }

        // Collect raw cells column by column; the csv reader already
        // rejects records whose length differs from the header.
        let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(|e| self.unavailable(e))?;
            for (cells, field) in raw.iter_mut().zip(record.iter()) {
                cells.push(field.to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(raw)
            .map(|(name, cells)| type_column(name, cells))
            .collect();

        let table = Table::from_columns(columns).map_err(|e| self.unavailable(e))?;

        tracing::info!(
            "Loaded {} rows × {} columns from '{}'",
            table.n_rows(),
            table.n_columns(),
            self.path.display()
        );
        Ok(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn is_missing(cell: &str) -> bool {
    let lower = cell.to_ascii_lowercase();
    MISSING_MARKERS.contains(&lower.as_str())
}

/// A cell as a score; "inf" and "infinity" parse as f64 but are rejected
fn parse_finite(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decide the column's type from all of its cells at once
fn type_column(name: String, cells: Vec<String>) -> Column {
    let numeric = cells
        .iter()
        .filter(|c| !is_missing(c))
        .all(|c| parse_finite(c).is_some());

    let values = cells
        .into_iter()
        .map(|c| {
            if is_missing(&c) {
                Value::Missing
            } else if numeric {
                parse_finite(&c).map(Value::Number).unwrap_or(Value::Missing)
            } else {
                Value::Text(c)
            }
        })
        .collect();

    Column::new(name, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::ColumnKind;
    use crate::test_support::{sample_csv, scratch_dir};

    #[test]
    fn test_loads_typed_columns() {
        let dir  = scratch_dir("loader_typed");
        let path = dir.join("students.csv");
        std::fs::write(&path, sample_csv()).unwrap();

        let table = CsvLoader::new(&path).load().unwrap();
        assert_eq!(table.n_columns(), 8);
        assert_eq!(table.n_rows(), 12);
        assert_eq!(table.column("math score").unwrap().kind(), Some(ColumnKind::Numeric));
        assert_eq!(table.column("gender").unwrap().kind(), Some(ColumnKind::Categorical));
    }

    #[test]
    fn test_missing_markers_become_missing() {
        let dir  = scratch_dir("loader_missing");
        let path = dir.join("m.csv");
        std::fs::write(&path, "a,b\n1,x\n,NA\nnan,y\n").unwrap();

        let table = CsvLoader::new(&path).load().unwrap();
        let a = table.column("a").unwrap();
        assert_eq!(a.values, vec![Value::Number(1.0), Value::Missing, Value::Missing]);
        let b = table.column("b").unwrap();
        assert_eq!(b.missing_count(), 1);
        assert!(!b.is_numeric());
    }

    #[test]
    fn test_infinite_cells_are_not_numbers() {
        let dir  = scratch_dir("loader_infinite");
        let path = dir.join("inf.csv");
        std::fs::write(&path, "a,b\n1,2\ninf,3\n").unwrap();

        let table = CsvLoader::new(&path).load().unwrap();
        assert_eq!(table.column("a").unwrap().kind(), Some(ColumnKind::Categorical));
        assert_eq!(table.numbers("b").unwrap(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let err = CsvLoader::new("does/not/exist.csv").load().unwrap_err();
        assert!(matches!(err, PipelineError::DataUnavailable { .. }));
    }

    #[test]
    fn test_ragged_rows_are_data_unavailable() {
        let dir  = scratch_dir("loader_ragged");
        let path = dir.join("bad.csv");
        std::fs::write(&path, "a,b\n1,2\n3\n").unwrap();

        let err = CsvLoader::new(&path).load().unwrap_err();
        assert!(matches!(err, PipelineError::DataUnavailable { .. }));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let dir  = scratch_dir("loader_semicolon");
        let path = dir.join("s.csv");
        std::fs::write(&path, "a;b\n1;2\n").unwrap();

        let table = CsvLoader::new(&path).with_delimiter(b';').load().unwrap();
        assert_eq!(table.numbers("b").unwrap(), vec![2.0]);
    }
}
