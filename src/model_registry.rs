//! Pre-trained model artifacts and the registry that owns them.
//!
//! Artifacts are opaque to the rest of the crate: a logistic classifier
//! serialized as JSON `{model_id, bias, weights, threshold}`, loaded once at
//! startup and exposed only through [`LinearModel::predict`].

use crate::disease::{Disease, ALL_DISEASES};
use crate::errors::{ClinsightError, ClinsightResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk weight layout of one trained classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelWeights {
    pub model_id: String,
    pub bias: f64,
    pub weights: Vec<f64>,
    pub threshold: f64,
}

/// Binary prediction with the raw logistic score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Prediction {
    /// 0 = negative class, 1 = positive class
    pub class: u8,
    /// Positive-class probability in [0, 1]
    pub probability: f64,
}

/// A loaded classifier. `predict` is the only operation.
pub struct LinearModel {
    weights: ModelWeights,
}

impl LinearModel {
    pub fn new(weights: ModelWeights) -> Self {
        Self { weights }
    }

    /// Load a serialized artifact from disk.
    pub fn from_file(path: &Path) -> ClinsightResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ClinsightError::io(format!("reading model artifact {}", path.display()), e)
        })?;
        let weights: ModelWeights = serde_json::from_str(&raw).map_err(|e| {
            ClinsightError::serialization(format!("model artifact {}", path.display()), e)
        })?;
        Ok(Self::new(weights))
    }

    pub fn model_id(&self) -> &str {
        &self.weights.model_id
    }

    pub fn feature_len(&self) -> usize {
        self.weights.weights.len()
    }

    /// Score a feature vector with logistic regression.
    ///
    /// The vector must have exactly as many entries as the trained weights;
    /// a mismatch means the caller assembled the vector against the wrong
    /// schema and is an error, not a soft failure.
    pub fn predict(&self, features: &[f64]) -> ClinsightResult<Prediction> {
        if features.len() != self.weights.weights.len() {
            return Err(ClinsightError::model(
                &self.weights.model_id,
                format!(
                    "expected {} features, got {}",
                    self.weights.weights.len(),
                    features.len()
                ),
            ));
        }

        let linear_score = self.weights.bias
            + features
                .iter()
                .zip(self.weights.weights.iter())
                .map(|(f, w)| f * w)
                .sum::<f64>();

        let probability = 1.0 / (1.0 + (-linear_score).exp());
        let class = u8::from(probability >= self.weights.threshold);

        Ok(Prediction { class, probability })
    }
}

/// Registry holding one loaded model per disease.
pub struct ModelRegistry {
    models: HashMap<Disease, LinearModel>,
}

impl ModelRegistry {
    /// Load every disease's artifact from `model_dir`.
    ///
    /// Artifacts are named `<disease key>.json`. Any missing or malformed
    /// artifact, or one whose weight count disagrees with the form schema,
    /// fails the whole load; startup is the only caller and treats that as
    /// fatal.
    pub fn load(model_dir: &Path) -> ClinsightResult<Self> {
        let mut models = HashMap::new();

        for disease in ALL_DISEASES {
            let path = Self::artifact_path(model_dir, disease);
            let model = LinearModel::from_file(&path)?;

            if model.feature_len() != disease.feature_len() {
                return Err(ClinsightError::model(
                    disease.key(),
                    format!(
                        "artifact has {} weights but the {} form has {} fields",
                        model.feature_len(),
                        disease.key(),
                        disease.feature_len()
                    ),
                ));
            }

            info!(
                disease = %disease,
                model_id = %model.model_id(),
                "loaded model artifact"
            );
            models.insert(disease, model);
        }

        Ok(Self { models })
    }

    pub fn artifact_path(model_dir: &Path, disease: Disease) -> PathBuf {
        model_dir.join(format!("{}.json", disease.key()))
    }

    pub fn get(&self, disease: Disease) -> ClinsightResult<&LinearModel> {
        self.models
            .get(&disease)
            .ok_or_else(|| ClinsightError::not_found("model", disease.key()))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_model(bias: f64, len: usize) -> LinearModel {
        LinearModel::new(ModelWeights {
            model_id: "test_model".to_string(),
            bias,
            weights: vec![0.0; len],
            threshold: 0.5,
        })
    }

    #[test]
    fn positive_bias_predicts_class_one() {
        let model = constant_model(4.0, 3);
        let prediction = model.predict(&[1.0, 2.0, 3.0]).expect("predict");
        assert_eq!(prediction.class, 1);
        assert!(prediction.probability > 0.5);
    }

    #[test]
    fn negative_bias_predicts_class_zero() {
        let model = constant_model(-4.0, 3);
        let prediction = model.predict(&[1.0, 2.0, 3.0]).expect("predict");
        assert_eq!(prediction.class, 0);
        assert!(prediction.probability < 0.5);
    }

    #[test]
    fn probability_stays_in_unit_interval() {
        let model = LinearModel::new(ModelWeights {
            model_id: "test_model".to_string(),
            bias: 0.3,
            weights: vec![2.0, -1.5],
            threshold: 0.5,
        });
        for features in [[0.0, 0.0], [100.0, -100.0], [-100.0, 100.0]] {
            let p = model.predict(&features).expect("predict").probability;
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn wrong_feature_count_is_an_error() {
        let model = constant_model(0.0, 3);
        assert!(model.predict(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn registry_load_fails_on_missing_artifact() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(ModelRegistry::load(dir.path()).is_err());
    }

    #[test]
    fn registry_load_reads_all_five_artifacts() {
        let dir = tempfile::tempdir().expect("temp dir");
        for disease in ALL_DISEASES {
            let weights = ModelWeights {
                model_id: format!("{}_v1", disease.key()),
                bias: 0.0,
                weights: vec![0.1; disease.feature_len()],
                threshold: 0.5,
            };
            let path = ModelRegistry::artifact_path(dir.path(), disease);
            std::fs::write(&path, serde_json::to_string(&weights).unwrap()).expect("write");
        }

        let registry = ModelRegistry::load(dir.path()).expect("load registry");
        assert_eq!(registry.len(), 5);
        for disease in ALL_DISEASES {
            assert_eq!(
                registry.get(disease).expect("model").feature_len(),
                disease.feature_len()
            );
        }
    }

    #[test]
    fn registry_load_rejects_weight_count_mismatch() {
        let dir = tempfile::tempdir().expect("temp dir");
        for disease in ALL_DISEASES {
            let weights = ModelWeights {
                model_id: format!("{}_v1", disease.key()),
                bias: 0.0,
                // One weight short for every disease
                weights: vec![0.1; disease.feature_len() - 1],
                threshold: 0.5,
            };
            let path = ModelRegistry::artifact_path(dir.path(), disease);
            std::fs::write(&path, serde_json::to_string(&weights).unwrap()).expect("write");
        }

        assert!(ModelRegistry::load(dir.path()).is_err());
    }
}
