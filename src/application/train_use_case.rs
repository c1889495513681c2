// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV               (Layer 4 - data)
//   Step 2: Fill missing values        (Layer 4 - data)
//   Step 3: Canonical names + scores   (Layer 4 - data)
//   Step 4: Split, fit, score          (Layer 5 - ml)
//   Step 5: Save model + metrics       (Layer 6 - infra)
//
// The stages themselves live behind the typed Pipeline; this use
// case only chooses the source and adds error context.

use anyhow::{Context, Result};

use crate::application::config::PipelineConfig;
use crate::application::pipeline::Pipeline;
use crate::ml::model::LinearModel;
use crate::ml::trainer::TrainReport;

pub struct TrainUseCase {
    config: PipelineConfig,
}

impl TrainUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<(LinearModel, TrainReport)> {
        let cfg = &self.config;
        cfg.validate()?;

        let loader = cfg.loader();

        let engineered = Pipeline::new(cfg.clone())
            .load(&loader)
            .context("Cannot load the dataset")?
            .clean()
            .context("Cannot fill missing values")?
            .engineer()
            .context("Cannot derive score columns")?;
        tracing::info!(
            "Engineered table: {} rows, columns {:?}",
            engineered.table().n_rows(),
            engineered.table().column_names()
        );

        let trained = engineered
            .train()
            .with_context(|| format!("Training failed; no model written to '{}'", cfg.model_path.display()))?;

        Ok((trained.model().clone(), trained.report().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;
    use crate::test_support::{sample_csv, scratch_dir};

    #[test]
    fn test_execute_writes_model() {
        let dir = scratch_dir("train_use_case");
        let cfg = PipelineConfig {
            data_path:  dir.join("data.csv"),
            model_path: dir.join("m.json"),
            ..Default::default()
        };
        std::fs::write(&cfg.data_path, sample_csv()).unwrap();

        let (model, report) = TrainUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!(model.feature_names, cfg.features);
        assert_eq!(report.n_test, 3);
        assert!(cfg.model_path.exists());
    }

    #[test]
    fn test_missing_data_keeps_error_kind() {
        let dir = scratch_dir("train_use_case_missing");
        let cfg = PipelineConfig {
            data_path:  dir.join("nope.csv"),
            model_path: dir.join("m.json"),
            ..Default::default()
        };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_all_missing_column_fails_cleaning() {
        let dir = scratch_dir("train_use_case_insufficient");
        let cfg = PipelineConfig {
            data_path:  dir.join("data.csv"),
            model_path: dir.join("m.json"),
            ..Default::default()
        };
        std::fs::write(
            &cfg.data_path,
            "gender,math score,reading score,writing score\n,1,2,3\n,4,5,6\n",
        )
        .unwrap();

        let err = TrainUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::InsufficientData { column }) if column == "gender"
        ));
        assert!(!cfg.model_path.exists());
    }
}
