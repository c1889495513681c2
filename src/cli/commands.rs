// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `predict`, `describe`
// and all their configurable flags.
//
// Every flag that maps onto PipelineConfig is optional. The
// config is built as: defaults → `--config` JSON file → flags,
// later sources overriding earlier ones.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use crate::application::config::PipelineConfig;
use crate::application::describe_use_case::default_group_columns;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean the dataset, fit the regression and save the model
    Train(TrainArgs),

    /// Predict an average score with a trained model
    Predict(PredictArgs),

    /// Print descriptive statistics of the dataset
    Describe(DescribeArgs),
}

/// Flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// JSON file with PipelineConfig fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Input CSV (default: data/StudentsPerformance.csv)
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    /// Model file (default: models/student_performance_model.json)
    #[arg(long)]
    pub model_path: Option<PathBuf>,

    /// Field separator of the input CSV (default ',')
    #[arg(long)]
    pub delimiter: Option<char>,
}

impl CommonArgs {
    /// Defaults, then the config file, then these flags
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None       => PipelineConfig::default(),
        };
        if let Some(p) = &self.data_path {
            cfg.data_path = p.clone();
        }
        if let Some(p) = &self.model_path {
            cfg.model_path = p.clone();
        }
        if let Some(d) = self.delimiter {
            cfg.delimiter = d;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Seed for the train/holdout shuffle (default 42)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fraction of rows held out, in [0, 1) (default 0.2)
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Comma-separated model inputs, in order
    /// (default math_score,reading_score,writing_score)
    #[arg(long, value_delimiter = ',')]
    pub features: Option<Vec<String>>,
}

/// Convert CLI TrainArgs into the application-layer config.
/// The application layer never sees clap types.
impl TryFrom<TrainArgs> for PipelineConfig {
    type Error = anyhow::Error;

    fn try_from(a: TrainArgs) -> Result<Self> {
        let mut cfg = a.common.resolve()?;
        if let Some(seed) = a.seed {
            cfg.seed = seed;
        }
        if let Some(f) = a.test_fraction {
            cfg.test_fraction = f;
        }
        if let Some(features) = a.features {
            cfg.features = features;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Math score (default: dataset mean)
    #[arg(long)]
    pub math_score: Option<f64>,

    /// Reading score (default: dataset mean)
    #[arg(long)]
    pub reading_score: Option<f64>,

    /// Writing score (default: dataset mean)
    #[arg(long)]
    pub writing_score: Option<f64>,

    /// Any other model input as name=value (repeatable)
    #[arg(long = "input", value_parser = parse_key_val)]
    pub inputs: Vec<(String, f64)>,

    /// Skip the dataset range check and mean defaults
    #[arg(long)]
    pub no_bounds: bool,
}

impl PredictArgs {
    /// Named values the user actually supplied
    pub fn given(&self) -> Vec<(String, f64)> {
        let mut given: Vec<(String, f64)> = [
            ("math_score", self.math_score),
            ("reading_score", self.reading_score),
            ("writing_score", self.writing_score),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name.to_string(), v)))
        .collect();
        given.extend(self.inputs.iter().cloned());
        given
    }
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Categorical column to average avg_score over (repeatable;
    /// default: gender and test preparation course)
    #[arg(long)]
    pub group_by: Vec<String>,
}

impl DescribeArgs {
    pub fn group_columns(&self) -> Vec<String> {
        if self.group_by.is_empty() {
            default_group_columns()
        } else {
            self.group_by.clone()
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, f64)> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name=value, got '{s}'"))?;
    let v: f64 = v.trim().parse().map_err(|e| anyhow!("bad value for '{k}': {e}"))?;
    Ok((k.trim().to_string(), v))
}
