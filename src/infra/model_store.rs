// ============================================================
// Layer 6 — Model Store
// ============================================================
// Saves and restores the fitted LinearModel as pretty-printed
// JSON (serde_json).
//
// File layout (default paths):
//   models/
//     student_performance_model.json   ← feature names, target,
//                                        intercept, coefficients
//     metrics.csv                      ← see metrics.rs
//
// Saving overwrites any previous model. The JSON is written to a
// sibling temp file first and then renamed over the target, so a
// reader never sees a half-written model.
//
// Loading distinguishes "never trained" (ModelNotFound) from
// "trained but unreadable" (InvalidModel).

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::ml::model::LinearModel;

pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn save(&self, model: &LinearModel) -> PipelineResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
        }

        let json = serde_json::to_string_pretty(model).map_err(|e| PipelineError::InvalidModel {
            path:   self.path.clone(),
            reason: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| PipelineError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| PipelineError::io(&self.path, e))?;

        tracing::info!("Model saved at '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> PipelineResult<LinearModel> {
        if !self.exists() {
            return Err(PipelineError::ModelNotFound { path: self.path.clone() });
        }

        let invalid = |reason: String| PipelineError::InvalidModel {
            path: self.path.clone(),
            reason,
        };

        let json  = fs::read_to_string(&self.path).map_err(|e| PipelineError::io(&self.path, e))?;
        let model: LinearModel = serde_json::from_str(&json).map_err(|e| invalid(e.to_string()))?;
        model.validate().map_err(invalid)?;

        tracing::info!("Model loaded from '{}'", self.path.display());
        Ok(model)
    }
}
