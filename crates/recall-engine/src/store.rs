//! Mastery-record storage interface.
//!
//! Persistence technology is a collaborator, not part of the engine: the
//! engine only needs point reads, per-user scans, and a conditional upsert.
//! The conditional variant carries the record's version counter so the
//! combined scheduler + difficulty update for one answer commits as a single
//! compare-and-swap, closing the lost-update window between the two halves.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::MasteryRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unreachable or failing; safe to retry as-is.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// Conditional write lost a race; reload before retrying.
    #[error("version conflict on {user_id}/{concept_id}: expected {expected}, found {found}")]
    VersionConflict {
        user_id: String,
        concept_id: String,
        expected: i64,
        found: i64,
    },
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::VersionConflict { .. })
    }
}

/// Storage for per-(user, concept) mastery records.
#[async_trait]
pub trait MasteryStore: Send + Sync {
    /// Point read. `Ok(None)` for a never-seen pair is not an error.
    async fn get(
        &self,
        user_id: &str,
        concept_id: &str,
    ) -> Result<Option<MasteryRecord>, StoreError>;

    /// Unconditional upsert (last writer wins).
    async fn put(&self, record: &MasteryRecord) -> Result<(), StoreError>;

    /// Conditional upsert: succeeds only when the stored version equals
    /// `expected_version` (0 meaning "no record yet"). The written record
    /// carries the caller's already-incremented version.
    async fn put_versioned(
        &self,
        record: &MasteryRecord,
        expected_version: i64,
    ) -> Result<(), StoreError>;

    /// All records for a user, ordered by next review date ascending.
    async fn query(&self, user_id: &str) -> Result<Vec<MasteryRecord>, StoreError>;
}

/// In-memory store for tests and single-process embedding.
#[derive(Default)]
pub struct InMemoryMasteryStore {
    records: RwLock<HashMap<(String, String), MasteryRecord>>,
}

impl InMemoryMasteryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(user_id: &str, concept_id: &str) -> (String, String) {
        (user_id.to_string(), concept_id.to_string())
    }
}

#[async_trait]
impl MasteryStore for InMemoryMasteryStore {
    async fn get(
        &self,
        user_id: &str,
        concept_id: &str,
    ) -> Result<Option<MasteryRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&Self::key(user_id, concept_id)).cloned())
    }

    async fn put(&self, record: &MasteryRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.insert(
            Self::key(&record.user_id, &record.concept_id),
            record.clone(),
        );
        Ok(())
    }

    async fn put_versioned(
        &self,
        record: &MasteryRecord,
        expected_version: i64,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let key = Self::key(&record.user_id, &record.concept_id);
        let found = records.get(&key).map(|existing| existing.version).unwrap_or(0);
        if found != expected_version {
            return Err(StoreError::VersionConflict {
                user_id: record.user_id.clone(),
                concept_id: record.concept_id.clone(),
                expected: expected_version,
                found,
            });
        }
        records.insert(key, record.clone());
        Ok(())
    }

    async fn query(&self, user_id: &str) -> Result<Vec<MasteryRecord>, StoreError> {
        let records = self.records.read().await;
        let mut out: Vec<MasteryRecord> = records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.next_review_date.cmp(&b.next_review_date));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn record(user: &str, concept: &str, offset_days: i64) -> MasteryRecord {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut record = MasteryRecord::bootstrap(user, concept, "exam_question", now);
        record.next_review_date = now + Duration::days(offset_days);
        record
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_pair() {
        let store = InMemoryMasteryStore::new();
        assert!(store.get("u1", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn versioned_put_creates_then_guards() {
        let store = InMemoryMasteryStore::new();
        let mut rec = record("u1", "c1", 0);
        rec.version = 1;
        store.put_versioned(&rec, 0).await.unwrap();

        // Same expected version again must conflict.
        let err = store.put_versioned(&rec, 0).await.unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { found: 1, .. }));
        assert!(err.is_retryable());

        rec.version = 2;
        store.put_versioned(&rec, 1).await.unwrap();
        let stored = store.get("u1", "c1").await.unwrap().unwrap();
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn query_is_per_user_and_ordered() {
        let store = InMemoryMasteryStore::new();
        store.put(&record("u1", "c-late", 9)).await.unwrap();
        store.put(&record("u1", "c-soon", 1)).await.unwrap();
        store.put(&record("u2", "c-other", 0)).await.unwrap();

        let records = store.query("u1").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].concept_id, "c-soon");
        assert_eq!(records[1].concept_id, "c-late");
    }
}
