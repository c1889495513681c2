// ============================================================
// Layer 3 — Feature Vector
// ============================================================
// One row of named input values supplied for prediction.
//
// The model remembers the feature names it was trained on, in
// order. `aligned_to` turns this loose, named bag of values into
// the exact ordered slice the model expects:
//   - entries the model does not know (e.g. avg_score) are dropped
//   - a feature the model needs but the vector lacks is an error

use crate::domain::error::{PipelineError, PipelineResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A repeated name overwrites the earlier value.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None        => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values ordered by `feature_names`, extras dropped
    pub fn aligned_to(&self, feature_names: &[String]) -> PipelineResult<Vec<f64>> {
        let dropped: Vec<&str> = self
            .names()
            .filter(|n| !feature_names.iter().any(|f| f.as_str() == *n))
            .collect();
        if !dropped.is_empty() {
            tracing::debug!("Ignoring inputs not used by the model: {:?}", dropped);
        }

        feature_names
            .iter()
            .map(|f| {
                self.get(f).ok_or_else(|| {
                    PipelineError::InvalidInput(format!("missing value for feature '{f}'"))
                })
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut v = Self::new();
        for (name, value) in iter {
            v.set(name, value);
        }
        v
    }
}
