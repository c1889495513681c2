// ============================================================
// Layer 2 — Describe Use Case (exploratory analysis)
// ============================================================
// Computes the numbers behind the usual first look at the
// dataset:
//   - descriptive statistics of every numeric column
//   - distribution of avg_score (20-bin histogram)
//   - mean avg_score per group of a categorical column
//     (gender, test preparation course by default)
//   - correlation between the subject scores and avg_score
//
// Runs load → clean → engineer first, so avg_score always comes
// from the canonical formula. Drawing the charts is left to the
// caller; the CLI prints the numbers as text.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::config::PipelineConfig;
use crate::application::pipeline::Pipeline;
use crate::data::features::AVG_SCORE;
use crate::data::stats::{self, ColumnSummary, Histogram};
use crate::domain::table::{Table, Value};

pub const HISTOGRAM_BINS: usize = 20;

pub fn default_group_columns() -> Vec<String> {
    vec!["gender".to_string(), "test preparation course".to_string()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub group: String,
    pub count: usize,
    pub mean:  f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBreakdown {
    pub column: String,
    pub groups: Vec<GroupMean>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub names:  Vec<String>,
    /// None where a column has zero variance
    pub values: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaReport {
    pub rows:        usize,
    pub summaries:   Vec<ColumnSummary>,
    pub histogram:   Option<Histogram>,
    pub breakdowns:  Vec<GroupBreakdown>,
    pub correlation: CorrelationMatrix,
}

pub struct DescribeUseCase {
    config:   PipelineConfig,
    group_by: Vec<String>,
}

impl DescribeUseCase {
    pub fn new(config: PipelineConfig, group_by: Vec<String>) -> Self {
        Self { config, group_by }
    }

    pub fn execute(&self) -> Result<EdaReport> {
        let loader = self.config.loader();
        let table = Pipeline::new(self.config.clone())
            .load(&loader)
            .context("Cannot load the dataset")?
            .clean()
            .context("Cannot fill missing values")?
            .engineer()
            .context("Cannot derive score columns")?
            .into_table();

        Ok(describe(&table, &self.config.features, &self.group_by))
    }
}

/// Build the report from an engineered table
pub fn describe(table: &Table, features: &[String], group_by: &[String]) -> EdaReport {
    let summaries = table
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .filter_map(|c| ColumnSummary::compute(c.name.clone(), &c.present_numbers()))
        .collect();

    let avg = table.numbers(AVG_SCORE).unwrap_or_default();
    let histogram = Histogram::compute(&avg, HISTOGRAM_BINS);

    let breakdowns = group_by
        .iter()
        .filter_map(|column| {
            let b = group_means(table, column, &avg);
            if b.is_none() {
                tracing::warn!("Skipping breakdown by '{}': not a categorical column", column);
            }
            b
        })
        .collect();

    let mut names: Vec<String> = features.to_vec();
    names.push(AVG_SCORE.to_string());
    let correlation = correlation_matrix(table, names);

    EdaReport { rows: table.n_rows(), summaries, histogram, breakdowns, correlation }
}

/// Mean of `values` per distinct text value of `column`, groups sorted by name
fn group_means(table: &Table, column: &str, values: &[f64]) -> Option<GroupBreakdown> {
    let col = table.column(column).filter(|c| !c.is_numeric())?;
    if values.len() != col.values.len() {
        return None;
    }

    let mut acc: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for (cell, v) in col.values.iter().zip(values) {
        if let Value::Text(group) = cell {
            let entry = acc.entry(group.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += v;
        }
    }

    let groups = acc
        .into_iter()
        .map(|(group, (count, sum))| GroupMean {
            group: group.to_string(),
            count,
            mean:  sum / count as f64,
        })
        .collect();
    Some(GroupBreakdown { column: column.to_string(), groups })
}

fn correlation_matrix(table: &Table, names: Vec<String>) -> CorrelationMatrix {
    let names: Vec<String> = names.into_iter().filter(|n| table.numbers(n).is_ok()).collect();
    let columns: Vec<Vec<f64>> = names.iter().filter_map(|n| table.numbers(n).ok()).collect();

    let values = columns
        .iter()
        .map(|a| columns.iter().map(|b| stats::pearson(a, b)).collect())
        .collect();
    CorrelationMatrix { names, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::features::{subject_columns, FeatureEngineer};
    use crate::domain::table::Column;
    use crate::test_support::{sample_csv, scratch_dir};

    fn engineered() -> Table {
        let t = Table::from_columns(vec![
            Column::categorical("gender", ["female", "male", "female", "male"]),
            Column::categorical("test preparation course", ["none", "completed", "completed", "none"]),
            Column::numeric("math score", [60.0, 90.0, 30.0, 45.0]),
            Column::numeric("reading score", [60.0, 60.0, 30.0, 60.0]),
            Column::numeric("writing score", [60.0, 30.0, 30.0, 75.0]),
        ])
        .unwrap();
        FeatureEngineer::new().engineer(t).unwrap()
    }

    #[test]
    fn test_group_means() {
        let r = describe(&engineered(), &subject_columns(), &default_group_columns());
        let gender = &r.breakdowns[0];
        assert_eq!(gender.column, "gender");
        // female: 60, 30 ; male: 60, 60
        assert_eq!(gender.groups[0], GroupMean { group: "female".into(), count: 2, mean: 45.0 });
        assert_eq!(gender.groups[1], GroupMean { group: "male".into(), count: 2, mean: 60.0 });
    }

    #[test]
    fn test_numeric_group_column_is_skipped() {
        let r = describe(&engineered(), &subject_columns(), &["math_score".to_string()]);
        assert!(r.breakdowns.is_empty());
    }

    #[test]
    fn test_summaries_cover_derived_columns() {
        let r = describe(&engineered(), &subject_columns(), &[]);
        let names: Vec<&str> = r.summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["math_score", "reading_score", "writing_score", "total_score", "avg_score"]
        );
        assert_eq!(r.histogram.unwrap().counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_correlation_diagonal_is_one() {
        let r = describe(&engineered(), &subject_columns(), &[]);
        assert_eq!(r.correlation.names.len(), 4);
        for i in 0..4 {
            let d = r.correlation.values[i][i].unwrap();
            assert!((d - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_execute_on_csv() {
        let dir = scratch_dir("describe_csv");
        let cfg = PipelineConfig { data_path: dir.join("d.csv"), ..Default::default() };
        std::fs::write(&cfg.data_path, sample_csv()).unwrap();

        let r = DescribeUseCase::new(cfg, default_group_columns()).execute().unwrap();
        assert_eq!(r.rows, 12);
        assert_eq!(r.breakdowns.len(), 2);
    }
}
