// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Serves predictions from the saved model:
//   1. Resume the pipeline from the persisted model
//      (ModelNotFound → the user has to run `train` first)
//   2. Look up each feature's observed range in the dataset
//   3. Fill omitted inputs with the feature mean, reject values
//      outside [min, max]
//   4. Predict
//
// The range lookup is best effort: without a readable dataset
// the inputs are used unchecked and none may be omitted.

use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::application::config::PipelineConfig;
use crate::application::pipeline::{Pipeline, PredictionReady};
use crate::data::stats::FeatureBounds;
use crate::domain::error::PipelineError;
use crate::domain::feature_vector::FeatureVector;

pub type Bounds = BTreeMap<String, FeatureBounds>;

pub struct PredictUseCase {
    config:   PipelineConfig,
    pipeline: Pipeline<PredictionReady>,
}

impl PredictUseCase {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let pipeline = Pipeline::new(config.clone())
            .resume()
            .context("Cannot load the trained model")?;
        Ok(Self { config, pipeline })
    }

    pub fn feature_names(&self) -> &[String] {
        self.pipeline.predictor().feature_names()
    }

    /// Observed min / max / mean of every model feature in the dataset
    pub fn feature_bounds(&self) -> Result<Bounds> {
        let loader = self.config.loader();
        let table  = Pipeline::new(self.config.clone())
            .load(&loader)?
            .clean()?
            .engineer()?
            .into_table();

        let mut bounds = Bounds::new();
        for name in self.feature_names() {
            let values = table.numbers(name)?;
            if let Some(b) = FeatureBounds::compute(&values) {
                bounds.insert(name.clone(), b);
            }
        }
        Ok(bounds)
    }

    /// Build the model input from the values the user gave.
    /// `bounds = None` disables defaulting and range checks.
    pub fn build_input(
        &self,
        given:  &BTreeMap<String, f64>,
        bounds: Option<&Bounds>,
    ) -> Result<FeatureVector> {
        let mut input = FeatureVector::new();

        for name in self.feature_names() {
            let range = bounds.and_then(|b| b.get(name));
            let value = match (given.get(name), range) {
                (Some(&v), Some(r)) if !r.contains(v) => {
                    return Err(PipelineError::InvalidInput(format!(
                        "{name} = {v} is outside the observed range [{}, {}]",
                        r.min, r.max
                    ))
                    .into());
                }
                (Some(&v), _) => v,
                (None, Some(r)) => {
                    tracing::info!("No value for {}, using the mean {:.2}", name, r.mean);
                    r.mean
                }
                (None, None) => {
                    return Err(PipelineError::InvalidInput(format!("no value given for {name}")).into());
                }
            };
            input.set(name.clone(), value);
        }

        for extra in given.keys().filter(|k| !self.feature_names().contains(*k)) {
            tracing::warn!("'{}' is not a model feature and will be ignored", extra);
        }

        Ok(input)
    }

    pub fn predict(&self, input: &FeatureVector) -> Result<f64> {
        Ok(self.pipeline.predict(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainUseCase;
    use crate::test_support::{sample_csv, scratch_dir};

    fn trained(name: &str) -> PipelineConfig {
        let dir = scratch_dir(name);
        let cfg = PipelineConfig {
            data_path:  dir.join("data.csv"),
            model_path: dir.join("models").join("m.json"),
            ..Default::default()
        };
        std::fs::write(&cfg.data_path, sample_csv()).unwrap();
        TrainUseCase::new(cfg.clone()).execute().unwrap();
        cfg
    }

    fn given(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_untrained_is_model_not_found() {
        let dir = scratch_dir("predict_untrained");
        let cfg = PipelineConfig { model_path: dir.join("m.json"), ..Default::default() };
        let err = PredictUseCase::new(cfg).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ModelNotFound { .. })
        ));
    }

    #[test]
    fn test_bounds_follow_dataset() {
        let uc = PredictUseCase::new(trained("predict_bounds")).unwrap();
        let b  = uc.feature_bounds().unwrap();
        assert_eq!(b["math_score"].min, 38.0);
        assert_eq!(b["math_score"].max, 90.0);
        assert_eq!(b["writing_score"].max, 93.0);
    }

    #[test]
    fn test_omitted_inputs_default_to_mean() {
        let uc     = PredictUseCase::new(trained("predict_defaults")).unwrap();
        let bounds = uc.feature_bounds().unwrap();
        let input  = uc.build_input(&given(&[("math_score", 50.0)]), Some(&bounds)).unwrap();
        assert_eq!(input.get("math_score"), Some(50.0));
        assert_eq!(input.get("reading_score"), Some(bounds["reading_score"].mean));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let uc     = PredictUseCase::new(trained("predict_range")).unwrap();
        let bounds = uc.feature_bounds().unwrap();
        let err    = uc.build_input(&given(&[("math_score", 100.0)]), Some(&bounds)).unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::InvalidInput(_))));
    }

    #[test]
    fn test_unchecked_inputs_must_be_complete() {
        let uc = PredictUseCase::new(trained("predict_unchecked")).unwrap();
        assert!(uc.build_input(&given(&[("math_score", 50.0)]), None).is_err());

        let all = given(&[("math_score", 100.0), ("reading_score", 100.0), ("writing_score", 100.0)]);
        let input = uc.build_input(&all, None).unwrap();
        let y = uc.predict(&input).unwrap();
        assert!((y - 100.0).abs() < 1e-6);
    }
}
