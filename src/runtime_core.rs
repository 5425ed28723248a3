//! runtime_core.rs
//! Wires the form schemas, model registry, prediction store, and session
//! registry into the single diagnose-and-record operation.

use crate::disease::Disease;
use crate::errors::{ClinsightResult, SafeLock};
use crate::form_router::{build_feature_vector, FormValues};
use crate::form_schema::schema_for;
use crate::model_registry::ModelRegistry;
use crate::prediction_store::{PredictionRecord, PredictionStore};
use crate::session::SessionRegistry;

use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Outcome of one completed prediction.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    pub disease: Disease,
    /// Human-facing diagnosis message
    pub result: String,
    pub class: u8,
    pub probability: f64,
    /// The history row as persisted
    pub record: PredictionRecord,
}

pub struct DiagnosisRuntime {
    pub models: ModelRegistry,
    pub store: Arc<Mutex<dyn PredictionStore>>,
    pub sessions: SessionRegistry,
}

impl std::fmt::Debug for DiagnosisRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosisRuntime").finish_non_exhaustive()
    }
}

impl DiagnosisRuntime {
    pub fn new(models: ModelRegistry, store: Arc<Mutex<dyn PredictionStore>>) -> Self {
        info!(models = models.len(), "diagnosis runtime initialized");
        Self {
            models,
            store,
            sessions: SessionRegistry::new(),
        }
    }

    /// Run one submit-and-predict interaction for an authenticated user.
    ///
    /// Validation failures stop before any model or store call. Model and
    /// store failures propagate to the caller unhandled; there is no retry
    /// or degraded path.
    pub fn diagnose(
        &self,
        user: &str,
        disease: Disease,
        values: &FormValues,
    ) -> ClinsightResult<Diagnosis> {
        let schema = schema_for(disease);
        let features = build_feature_vector(schema, values)?;

        let model = self.models.get(disease)?;
        let prediction = model.predict(&features)?;
        let result = disease.diagnosis_message(prediction.class);

        let record = self
            .store
            .safe_lock()?
            .save(user, disease, result, prediction.probability)?;

        info!(
            user = %user,
            disease = %disease,
            class = prediction.class,
            "prediction recorded"
        );

        Ok(Diagnosis {
            disease,
            result: result.to_string(),
            class: prediction.class,
            probability: prediction.probability,
            record,
        })
    }

    /// History rows for one user, newest first.
    pub fn history(&self, user: &str) -> ClinsightResult<Vec<PredictionRecord>> {
        self.store.safe_lock()?.history(user)
    }

    /// Runtime status for readiness reporting.
    pub fn status(&self) -> serde_json::Value {
        serde_json::json!({
            "models_loaded": self.models.len(),
        })
    }
}
