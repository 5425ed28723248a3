//! End-to-end coverage of the submit-validate-predict-record flow across
//! all five disease forms.

use crate::disease::{Disease, ALL_DISEASES};
use crate::form_router::FormValues;
use crate::form_schema::schema_for;
use crate::model_registry::{ModelRegistry, ModelWeights};
use crate::prediction_store_sled::PredictionStoreSled;
use crate::runtime_core::DiagnosisRuntime;
use std::sync::{Arc, Mutex};

fn runtime_with_bias(dir: &tempfile::TempDir, bias: f64) -> DiagnosisRuntime {
    let model_dir = dir.path().join("models");
    std::fs::create_dir_all(&model_dir).expect("model dir");
    for disease in ALL_DISEASES {
        let weights = ModelWeights {
            model_id: format!("{}_v1", disease.key()),
            bias,
            weights: vec![0.0; disease.feature_len()],
            threshold: 0.5,
        };
        std::fs::write(
            ModelRegistry::artifact_path(&model_dir, disease),
            serde_json::to_string(&weights).unwrap(),
        )
        .expect("write artifact");
    }

    let models = ModelRegistry::load(&model_dir).expect("load models");
    let store = PredictionStoreSled::new(dir.path().join("store").to_str().expect("utf8"))
        .expect("open store");
    DiagnosisRuntime::new(models, Arc::new(Mutex::new(store)))
}

fn filled_form(disease: Disease) -> FormValues {
    schema_for(disease)
        .fields
        .iter()
        .map(|f| (f.name.to_string(), "1".to_string()))
        .collect()
}

#[test]
fn every_form_predicts_and_records_when_fully_filled() {
    let dir = tempfile::tempdir().expect("temp dir");
    let runtime = runtime_with_bias(&dir, 4.0);

    for disease in ALL_DISEASES {
        let diagnosis = runtime
            .diagnose("alice", disease, &filled_form(disease))
            .unwrap_or_else(|e| panic!("{disease} failed: {e}"));
        assert_eq!(diagnosis.class, 1);
        assert_eq!(diagnosis.result, disease.diagnosis_message(1));
    }

    let rows = runtime.history("alice").expect("history");
    assert_eq!(rows.len(), ALL_DISEASES.len());
    // Newest first: the last disease diagnosed comes back first
    assert_eq!(rows[0].disease, Disease::HypoThyroid);
    assert_eq!(rows[rows.len() - 1].disease, Disease::Diabetes);
}

#[test]
fn every_form_blocks_on_a_single_empty_field() {
    let dir = tempfile::tempdir().expect("temp dir");
    let runtime = runtime_with_bias(&dir, 4.0);

    for disease in ALL_DISEASES {
        let first_field = schema_for(disease).fields[0].name;
        let mut form = filled_form(disease);
        form.insert(first_field.to_string(), String::new());

        let err = runtime
            .diagnose("alice", disease, &form)
            .expect_err("empty field must fail");
        assert!(err.to_string().contains(first_field));
    }

    // No model call succeeded, so no rows were written
    assert!(runtime.history("alice").expect("history").is_empty());
}

#[test]
fn negative_class_uses_the_negative_message() {
    let dir = tempfile::tempdir().expect("temp dir");
    let runtime = runtime_with_bias(&dir, -4.0);

    for disease in ALL_DISEASES {
        let diagnosis = runtime
            .diagnose("bob", disease, &filled_form(disease))
            .expect("diagnose");
        assert_eq!(diagnosis.class, 0);
        assert_eq!(diagnosis.result, disease.diagnosis_message(0));
    }
}

#[test]
fn history_rows_carry_the_recorded_probability() {
    let dir = tempfile::tempdir().expect("temp dir");
    let runtime = runtime_with_bias(&dir, 4.0);

    let diagnosis = runtime
        .diagnose("carol", Disease::LungCancer, &filled_form(Disease::LungCancer))
        .expect("diagnose");

    let rows = runtime.history("carol").expect("history");
    assert_eq!(rows.len(), 1);
    assert!((rows[0].probability - diagnosis.probability).abs() < f64::EPSILON);
    assert_eq!(rows[0].user, "carol");
}
