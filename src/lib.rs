//! Library root for the `clinsight` crate

// Core error handling
pub mod errors;

// Disease catalogue and form descriptors
pub mod disease;
pub mod form_router;
pub mod form_schema;

// Pre-trained model artifacts
pub mod model_registry;

// Prediction history store
pub mod prediction_store;
pub mod prediction_store_sled;

// Sessions & runtime core
pub mod runtime_core;
pub mod session;

// Configuration & CLI
pub mod cli;
pub mod config_loader;

// Web server interface
pub mod diagweb;

#[cfg(test)]
mod tests {
    pub mod diagnosis_flow;
}

// Re-export the types most callers need
pub use disease::{Disease, ALL_DISEASES};
pub use errors::{ClinsightError, ClinsightResult};
pub use model_registry::{LinearModel, ModelRegistry, ModelWeights, Prediction};
pub use prediction_store::{PredictionRecord, PredictionStore};
pub use runtime_core::{Diagnosis, DiagnosisRuntime};
