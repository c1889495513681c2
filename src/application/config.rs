// ============================================================
// Layer 2 — Pipeline Configuration
// ============================================================
// Everything a run needs to know, passed explicitly into each
// stage: where the data lives, where the model goes, how the
// rows are split and which columns the model uses.
//
// Serialisable, so it can be kept as a JSON file and loaded with
// `--config`. Missing keys fall back to the defaults below.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::features::{subject_columns, AVG_SCORE};
use crate::data::loader::CsvLoader;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_path:     PathBuf,
    pub model_path:    PathBuf,
    /// Field separator of the data file (single ASCII character)
    pub delimiter:     char,
    pub seed:          u64,
    /// Fraction of rows held out from fitting, in [0, 1)
    pub test_fraction: f64,
    /// Model inputs, in order
    pub features:      Vec<String>,
    pub target:        String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path:     PathBuf::from("data/StudentsPerformance.csv"),
            model_path:    PathBuf::from("models/student_performance_model.json"),
            delimiter:     ',',
            seed:          42,
            test_fraction: 0.2,
            features:      subject_columns(),
            target:        AVG_SCORE.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..1.0).contains(&self.test_fraction),
            "test_fraction must be in [0, 1), got {}",
            self.test_fraction
        );
        ensure!(!self.target.is_empty(), "target column name is empty");
        ensure!(
            (self.delimiter.is_ascii() && !self.delimiter.is_ascii_control()) || self.delimiter == '\t',
            "delimiter must be a printable ASCII character or tab, got {:?}",
            self.delimiter
        );
        Ok(())
    }

    /// Reader for the configured data file
    pub fn loader(&self) -> CsvLoader {
        CsvLoader::new(&self.data_path).with_delimiter(self.delimiter as u8)
    }

    /// Directory the model (and its metrics log) is written to
    pub fn model_dir(&self) -> PathBuf {
        self.model_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
