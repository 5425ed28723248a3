use crate::disease::{Disease, ALL_DISEASES};
use crate::errors::{ClinsightError, ClinsightResult};
use crate::form_router::FormValues;
use crate::form_schema::{schema_for, FormSchema};
use crate::prediction_store::PredictionRecord;
use crate::runtime_core::{DiagnosisRuntime, Diagnosis};
use crate::session::{Authenticator, SessionContext};
use axum::{
    extract::{Extension, Path, Query},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tower_http::cors::CorsLayer;

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub session_id: String,
    pub disease: String,
    pub values: FormValues,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    /// A missing id resolves to no session and fails the login gate
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct DiseaseEntry {
    pub key: &'static str,
    pub title: &'static str,
    pub fields: usize,
}

type SharedRuntime = Arc<RwLock<DiagnosisRuntime>>;

/// Build the full router: session gate, forms, prediction, history, and
/// health checks.
pub fn build_diagnosis_router(runtime: SharedRuntime) -> Router {
    Router::new()
        .route("/api/session/login", post(login))
        .route("/api/session/logout", post(logout))
        .route("/api/diseases", get(list_diseases))
        .route("/api/forms/{disease}", get(form_schema))
        .route("/api/predict", post(predict))
        .route("/api/history", get(history))
        // health endpoints
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(CorsLayer::permissive())
        .layer(Extension(runtime))
}

fn read_runtime(
    runtime: &SharedRuntime,
) -> ClinsightResult<std::sync::RwLockReadGuard<'_, DiagnosisRuntime>> {
    runtime.read().map_err(|_| ClinsightError::MutexPoisoned {
        resource: "diagnosis_runtime".to_string(),
    })
}

fn write_runtime(
    runtime: &SharedRuntime,
) -> ClinsightResult<std::sync::RwLockWriteGuard<'_, DiagnosisRuntime>> {
    runtime.write().map_err(|_| ClinsightError::MutexPoisoned {
        resource: "diagnosis_runtime".to_string(),
    })
}

/// Everything past login goes through here: resolve the session or 401.
fn authenticated_user(runtime: &DiagnosisRuntime, session_id: &str) -> ClinsightResult<String> {
    runtime
        .sessions
        .current_user(session_id)
        .ok_or_else(|| ClinsightError::auth("not logged in"))
}

fn parse_disease(raw: &str) -> ClinsightResult<Disease> {
    Disease::from_str(raw).map_err(|_| ClinsightError::not_found("disease", raw))
}

#[axum::debug_handler]
async fn login(
    Extension(runtime): Extension<SharedRuntime>,
    Json(req): Json<LoginRequest>,
) -> ClinsightResult<Json<SessionContext>> {
    let user = req.user.trim();
    if user.is_empty() {
        return Err(ClinsightError::validation("user", "user must not be empty"));
    }

    let mut runtime = write_runtime(&runtime)?;
    let context = runtime.sessions.login(user);
    Ok(Json(context))
}

#[axum::debug_handler]
async fn logout(
    Extension(runtime): Extension<SharedRuntime>,
    Json(req): Json<LogoutRequest>,
) -> ClinsightResult<Json<serde_json::Value>> {
    let mut runtime = write_runtime(&runtime)?;
    let cleared = runtime.sessions.logout(&req.session_id);
    Ok(Json(serde_json::json!({ "logged_out": cleared })))
}

#[axum::debug_handler]
async fn list_diseases(
    Extension(runtime): Extension<SharedRuntime>,
    Query(query): Query<SessionQuery>,
) -> ClinsightResult<Json<Vec<DiseaseEntry>>> {
    let runtime = read_runtime(&runtime)?;
    authenticated_user(&runtime, &query.session_id)?;

    let entries = ALL_DISEASES
        .iter()
        .map(|d| DiseaseEntry {
            key: d.key(),
            title: d.title(),
            fields: d.feature_len(),
        })
        .collect();
    Ok(Json(entries))
}

#[axum::debug_handler]
async fn form_schema(
    Extension(runtime): Extension<SharedRuntime>,
    Path(disease): Path<String>,
    Query(query): Query<SessionQuery>,
) -> ClinsightResult<Json<&'static FormSchema>> {
    let runtime = read_runtime(&runtime)?;
    authenticated_user(&runtime, &query.session_id)?;

    let disease = parse_disease(&disease)?;
    Ok(Json(schema_for(disease)))
}

#[axum::debug_handler]
async fn predict(
    Extension(runtime): Extension<SharedRuntime>,
    Json(req): Json<PredictRequest>,
) -> ClinsightResult<Json<Diagnosis>> {
    let runtime = read_runtime(&runtime)?;
    let user = authenticated_user(&runtime, &req.session_id)?;
    let disease = parse_disease(&req.disease)?;

    let diagnosis = runtime.diagnose(&user, disease, &req.values)?;
    Ok(Json(diagnosis))
}

#[axum::debug_handler]
async fn history(
    Extension(runtime): Extension<SharedRuntime>,
    Query(query): Query<SessionQuery>,
) -> ClinsightResult<Json<Vec<PredictionRecord>>> {
    let runtime = read_runtime(&runtime)?;
    let user = authenticated_user(&runtime, &query.session_id)?;
    Ok(Json(runtime.history(&user)?))
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[axum::debug_handler]
async fn readyz(
    Extension(runtime): Extension<SharedRuntime>,
) -> ClinsightResult<Json<serde_json::Value>> {
    let runtime = read_runtime(&runtime)?;
    let ready = runtime.models.len() == ALL_DISEASES.len();
    Ok(Json(serde_json::json!({
        "ready": ready,
        "status": runtime.status(),
    })))
}
