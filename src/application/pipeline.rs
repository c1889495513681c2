// ============================================================
// Layer 2 — Pipeline State Machine
// ============================================================
//   Unloaded → Loaded → Cleaned → FeatureEngineered
//            → Trained → PredictionReady
//
// Each state is its own type and each transition consumes the
// pipeline in the previous state, so the compiler rejects
// skipping a stage or going backwards. PredictionReady can also
// be reached directly from a previously saved model (`resume`),
// which is how the predict command starts.

use crate::application::config::PipelineConfig;
use crate::data::cleaner::Cleaner;
use crate::data::features::FeatureEngineer;
use crate::domain::error::PipelineResult;
use crate::domain::feature_vector::FeatureVector;
use crate::domain::table::Table;
use crate::domain::traits::TableSource;
use crate::infra::model_store::ModelStore;
use crate::ml::model::LinearModel;
use crate::ml::predictor::Predictor;
use crate::ml::trainer::{TrainReport, Trainer};

// ─── States ───────────────────────────────────────────────────────────────────
pub struct Unloaded;
pub struct Loaded(Table);
pub struct Cleaned(Table);
pub struct FeatureEngineered(Table);
pub struct Trained {
    model:  LinearModel,
    report: TrainReport,
}
pub struct PredictionReady(Predictor);

pub struct Pipeline<S> {
    config: PipelineConfig,
    state:  S,
}

impl<S> Pipeline<S> {
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Consume the current state to build the next one
    fn advance<T>(
        self,
        step: impl FnOnce(S, &PipelineConfig) -> PipelineResult<T>,
    ) -> PipelineResult<Pipeline<T>> {
        let state = step(self.state, &self.config)?;
        Ok(Pipeline { config: self.config, state })
    }
}

impl Pipeline<Unloaded> {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config, state: Unloaded }
    }

    pub fn load(self, source: &dyn TableSource) -> PipelineResult<Pipeline<Loaded>> {
        tracing::info!("Loading dataset from {}", source.describe());
        self.advance(|Unloaded, _| Ok(Loaded(source.load()?)))
    }

    /// Skip straight to serving predictions from the saved model
    pub fn resume(self) -> PipelineResult<Pipeline<PredictionReady>> {
        self.advance(|Unloaded, cfg| {
            let store = ModelStore::new(&cfg.model_path);
            Ok(PredictionReady(Predictor::from_store(&store)?))
        })
    }
}

impl Pipeline<Loaded> {
    pub fn table(&self) -> &Table {
        &self.state.0
    }

    pub fn clean(self) -> PipelineResult<Pipeline<Cleaned>> {
        self.advance(|Loaded(table), _| Ok(Cleaned(Cleaner::new().clean(table)?)))
    }
}

impl Pipeline<Cleaned> {
    pub fn table(&self) -> &Table {
        &self.state.0
    }

    pub fn engineer(self) -> PipelineResult<Pipeline<FeatureEngineered>> {
        self.advance(|Cleaned(table), _| {
            Ok(FeatureEngineered(FeatureEngineer::new().engineer(table)?))
        })
    }
}

impl Pipeline<FeatureEngineered> {
    pub fn table(&self) -> &Table {
        &self.state.0
    }

    pub fn into_table(self) -> Table {
        self.state.0
    }

    /// Fit and persist to the configured model path
    pub fn train(self) -> PipelineResult<Pipeline<Trained>> {
        self.advance(|FeatureEngineered(table), cfg| {
            let store = ModelStore::new(&cfg.model_path);
            let (model, report) = Trainer::new(cfg).train(table, &store)?;
            Ok(Trained { model, report })
        })
    }
}

impl Pipeline<Trained> {
    pub fn model(&self) -> &LinearModel {
        &self.state.model
    }

    pub fn report(&self) -> &TrainReport {
        &self.state.report
    }

    /// Serve predictions from the model just trained, no reload needed
    pub fn ready(self) -> PipelineResult<Pipeline<PredictionReady>> {
        self.advance(|Trained { model, .. }, _| Ok(PredictionReady(Predictor::from_model(model))))
    }
}

impl Pipeline<PredictionReady> {
    pub fn predictor(&self) -> &Predictor {
        &self.state.0
    }

    pub fn predict(&self, input: &FeatureVector) -> PipelineResult<f64> {
        self.state.0.predict(input)
    }
}
