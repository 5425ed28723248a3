use chrono::Utc;
use sled::Db;
use tracing::debug;
use uuid::Uuid;

use crate::disease::Disease;
use crate::errors::{ClinsightError, ClinsightResult};
use crate::prediction_store::{PredictionRecord, PredictionStore};

/// Separator between key segments. Not allowed in user names, so prefix
/// scans for one user can never bleed into another user's rows.
const KEY_SEP: u8 = 0x1f;

/// A sled-backed implementation of PredictionStore.
///
/// One long-lived Db handle, one `history` tree. Every insert is flushed
/// immediately, so each save commits on its own.
pub struct PredictionStoreSled {
    db: Db,
}

impl PredictionStoreSled {
    /// Open (or create) the store at `path`.
    pub fn new(path: &str) -> ClinsightResult<Self> {
        let db = sled::open(path).map_err(|e| {
            ClinsightError::database(format!("opening prediction store at {path}"), e)
        })?;
        Ok(PredictionStoreSled { db })
    }

    fn tree(&self) -> ClinsightResult<sled::Tree> {
        self.db
            .open_tree("history")
            .map_err(|e| ClinsightError::database("opening history tree", e))
    }

    /// Key layout: `user 0x1f zero-padded-nanos 0x1f uuid`.
    ///
    /// Zero-padding keeps lexicographic key order equal to timestamp order
    /// within a user's prefix; the uuid suffix disambiguates same-nanosecond
    /// writes.
    fn row_key(user: &str, timestamp_nanos: i64) -> Vec<u8> {
        let mut key = Vec::with_capacity(user.len() + 60);
        key.extend_from_slice(user.as_bytes());
        key.push(KEY_SEP);
        key.extend_from_slice(format!("{timestamp_nanos:020}").as_bytes());
        key.push(KEY_SEP);
        key.extend_from_slice(Uuid::new_v4().to_string().as_bytes());
        key
    }

    fn user_prefix(user: &str) -> Vec<u8> {
        let mut prefix = Vec::with_capacity(user.len() + 1);
        prefix.extend_from_slice(user.as_bytes());
        prefix.push(KEY_SEP);
        prefix
    }
}

impl PredictionStore for PredictionStoreSled {
    fn save(
        &self,
        user: &str,
        disease: Disease,
        result: &str,
        probability: f64,
    ) -> ClinsightResult<PredictionRecord> {
        if user.is_empty() || user.bytes().any(|b| b == KEY_SEP) {
            return Err(ClinsightError::validation("user", "invalid user identifier"));
        }

        let record = PredictionRecord {
            user: user.to_string(),
            disease,
            result: result.to_string(),
            probability,
            timestamp: Utc::now(),
        };

        let nanos = record
            .timestamp
            .timestamp_nanos_opt()
            .ok_or_else(|| ClinsightError::internal("timestamp out of nanosecond range"))?;

        let data = serde_json::to_vec(&record)
            .map_err(|e| ClinsightError::serialization("prediction record", e))?;

        let tree = self.tree()?;
        tree.insert(Self::row_key(user, nanos), data)?;
        tree.flush()?;

        debug!(user = %user, disease = %disease, "saved prediction row");
        Ok(record)
    }

    fn history(&self, user: &str) -> ClinsightResult<Vec<PredictionRecord>> {
        let tree = self.tree()?;
        let mut rows = Vec::new();

        // Keys within the prefix sort by timestamp ascending; walk backwards
        // for newest-first.
        for item in tree.scan_prefix(Self::user_prefix(user)).rev() {
            let (_, value) = item?;
            let record: PredictionRecord = serde_json::from_slice(&value)
                .map_err(|e| ClinsightError::serialization("prediction record", e))?;
            rows.push(record);
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, PredictionStoreSled) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store =
            PredictionStoreSled::new(dir.path().to_str().expect("utf8 path")).expect("open store");
        (dir, store)
    }

    #[test]
    fn save_then_history_returns_the_row() {
        let (_dir, store) = open_store();
        store
            .save("alice", Disease::Diabetes, "The person is diabetic", 0.91)
            .expect("save");

        let rows = store.history("alice").expect("history");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user, "alice");
        assert_eq!(rows[0].disease, Disease::Diabetes);
        assert_eq!(rows[0].result, "The person is diabetic");
        assert!((rows[0].probability - 0.91).abs() < f64::EPSILON);
    }

    #[test]
    fn history_is_newest_first() {
        let (_dir, store) = open_store();
        for i in 0..5 {
            store
                .save("alice", Disease::HeartDisease, &format!("result {i}"), 0.5)
                .expect("save");
        }

        let rows = store.history("alice").expect("history");
        assert_eq!(rows.len(), 5);
        for pair in rows.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        assert_eq!(rows[0].result, "result 4");
        assert_eq!(rows[4].result, "result 0");
    }

    #[test]
    fn history_is_scoped_per_user() {
        let (_dir, store) = open_store();
        store
            .save("alice", Disease::Parkinsons, "r", 0.2)
            .expect("save");
        store
            .save("bob", Disease::LungCancer, "r", 0.8)
            .expect("save");

        assert_eq!(store.history("alice").expect("history").len(), 1);
        assert_eq!(store.history("bob").expect("history").len(), 1);
        assert!(store.history("carol").expect("history").is_empty());
    }

    #[test]
    fn user_names_that_could_break_keys_are_rejected() {
        let (_dir, store) = open_store();
        assert!(store.save("", Disease::Diabetes, "r", 0.5).is_err());
        assert!(store
            .save("ali\u{1f}ce", Disease::Diabetes, "r", 0.5)
            .is_err());
    }
}
