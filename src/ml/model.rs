// ============================================================
// Layer 5 — Linear Model
// ============================================================
//   ŷ = intercept + Σ coefficients[i] · x[i]
//
// The model carries the names of its features, in the order the
// coefficients expect them, and the name of the column it was
// trained to predict. Persisting the names with the numbers makes
// the feature order an explicit part of the artifact instead of
// something the caller has to remember.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::traits::Regressor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub target:        String,
    pub intercept:     f64,
    pub coefficients:  Vec<f64>,
}

impl LinearModel {
    pub fn new(
        feature_names: Vec<String>,
        target:        impl Into<String>,
        intercept:     f64,
        coefficients:  Vec<f64>,
    ) -> Self {
        Self { feature_names, target: target.into(), intercept, coefficients }
    }

    /// Structural checks for a model read back from disk
    pub fn validate(&self) -> Result<(), String> {
        if self.feature_names.is_empty() {
            return Err("model has no features".to_string());
        }
        if self.feature_names.len() != self.coefficients.len() {
            return Err(format!(
                "{} feature names but {} coefficients",
                self.feature_names.len(),
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("non-finite coefficient".to_string());
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_row(&self, features: &[f64]) -> PipelineResult<f64> {
        if features.len() != self.coefficients.len() {
            return Err(PipelineError::InvalidInput(format!(
                "expected {} feature values, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feature_vector::FeatureVector;

    fn third_each() -> LinearModel {
        LinearModel::new(
            vec!["math_score".into(), "reading_score".into(), "writing_score".into()],
            "avg_score",
            0.0,
            vec![1.0 / 3.0; 3],
        )
    }

    #[test]
    fn test_predict_row() {
        let m = LinearModel::new(vec!["a".into(), "b".into()], "y", 1.0, vec![2.0, 3.0]);
        assert_eq!(m.predict_row(&[1.0, 1.0]).unwrap(), 6.0);
    }

    #[test]
    fn test_predict_row_wrong_width() {
        let err = third_each().predict_row(&[1.0]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn test_predict_named_vector_ignores_extras() {
        let v = FeatureVector::new()
            .with("avg_score", 0.0)
            .with("writing_score", 90.0)
            .with("reading_score", 60.0)
            .with("math_score", 30.0);
        let y = third_each().predict(&v).unwrap();
        assert!((y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate() {
        assert!(third_each().validate().is_ok());

        let mut m = third_each();
        m.coefficients.pop();
        assert!(m.validate().is_err());

        let mut m = third_each();
        m.intercept = f64::NAN;
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_bits() {
        let m    = LinearModel::new(vec!["a".into()], "y", 0.1 + 0.2, vec![1.0 / 3.0]);
        let json = serde_json::to_string(&m).unwrap();
        let back: LinearModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.intercept.to_bits(), m.intercept.to_bits());
        assert_eq!(back.coefficients[0].to_bits(), m.coefficients[0].to_bits());
    }
}
