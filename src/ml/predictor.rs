// ============================================================
// Layer 5 — Predictor
// ============================================================
// Loads a persisted model once and serves any number of
// predictions from it. Each prediction is a single deterministic
// dot product; nothing is retried.

use crate::domain::error::PipelineResult;
use crate::domain::feature_vector::FeatureVector;
use crate::domain::traits::Regressor;
use crate::infra::model_store::ModelStore;
use crate::ml::model::LinearModel;

pub struct Predictor {
    model: LinearModel,
}

impl Predictor {
    /// Fails with ModelNotFound if nothing has been trained yet
    pub fn from_store(store: &ModelStore) -> PipelineResult<Self> {
        let model = store.load()?;
        Ok(Self { model })
    }

    /// Wrap a model that is already in memory (e.g. just trained)
    pub fn from_model(model: LinearModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn feature_names(&self) -> &[String] {
        &self.model.feature_names
    }

    pub fn predict(&self, input: &FeatureVector) -> PipelineResult<f64> {
        let y = self.model.predict(input)?;
        tracing::debug!("Predicted {} = {:.4}", self.model.target, y);
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;
    use crate::test_support::scratch_dir;

    #[test]
    fn test_before_training_is_model_not_found() {
        let dir   = scratch_dir("predictor_untrained");
        let store = ModelStore::new(dir.join("student_performance_model.json"));
        let err   = Predictor::from_store(&store).err().unwrap();
        assert!(matches!(err, PipelineError::ModelNotFound { .. }));
    }

    #[test]
    fn test_predicts_from_persisted_model() {
        let dir   = scratch_dir("predictor_persisted");
        let store = ModelStore::new(dir.join("m.json"));
        store
            .save(&LinearModel::new(vec!["x".into()], "y", 1.0, vec![2.0]))
            .unwrap();

        let p = Predictor::from_store(&store).unwrap();
        let v = FeatureVector::new().with("x", 4.0).with("avg_score", 50.0);
        assert_eq!(p.predict(&v).unwrap(), 9.0);
        // unlimited predictions from the same instance
        assert_eq!(p.predict(&FeatureVector::new().with("x", 0.0)).unwrap(), 1.0);
    }
}
