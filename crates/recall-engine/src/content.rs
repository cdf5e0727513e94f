//! Content-pool interface.
//!
//! The planner needs candidate concepts the user has not started yet;
//! resolving concept ids to actual question content happens outside this
//! crate. The provider's selection logic is its own business; the engine
//! only relies on the stated contract: up to `limit` candidates, already
//! restricted to `topics` when any are given.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// A not-yet-practiced concept offered by the content pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConcept {
    pub concept_id: String,
    pub concept_type: String,
    /// Estimated difficulty, 0-100.
    pub difficulty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub topic: Option<String>,
}

#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn candidate_concepts(
        &self,
        user_id: &str,
        topics: &[String],
        limit: usize,
    ) -> Result<Vec<NewConcept>, StoreError>;
}

/// Fixed candidate pool for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticContentPool {
    concepts: Vec<NewConcept>,
}

impl StaticContentPool {
    pub fn new(concepts: Vec<NewConcept>) -> Self {
        Self { concepts }
    }
}

#[async_trait]
impl ContentProvider for StaticContentPool {
    async fn candidate_concepts(
        &self,
        _user_id: &str,
        topics: &[String],
        limit: usize,
    ) -> Result<Vec<NewConcept>, StoreError> {
        Ok(self
            .concepts
            .iter()
            .filter(|concept| {
                topics.is_empty()
                    || concept
                        .topic
                        .as_ref()
                        .is_some_and(|topic| topics.contains(topic))
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
