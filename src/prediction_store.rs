use crate::disease::Disease;
use crate::errors::ClinsightResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted prediction-history row.
///
/// Rows are append-only: created by a completed prediction, never updated
/// or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub user: String,
    pub disease: Disease,
    /// Diagnosis message shown to the user
    pub result: String,
    /// Positive-class probability in [0, 1]
    pub probability: f64,
    /// Server-assigned creation time
    pub timestamp: DateTime<Utc>,
}

/// Append-only store for prediction history.
pub trait PredictionStore: Send + Sync {
    /// Append one row, assigning the timestamp server-side. Returns the row
    /// as persisted.
    fn save(
        &self,
        user: &str,
        disease: Disease,
        result: &str,
        probability: f64,
    ) -> ClinsightResult<PredictionRecord>;

    /// All rows for `user`, ordered by timestamp descending.
    fn history(&self, user: &str) -> ClinsightResult<Vec<PredictionRecord>>;
}
