//! Account-level analytics interface.
//!
//! Read-only aggregate stats consumed by the planner and predictor. The real
//! aggregator lives outside this crate; [`StaticAnalytics`] stands in for it
//! in tests and single-user embeddings.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Aggregate stats for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    /// Overall accuracy across all concepts, 0-100.
    pub overall_accuracy: f64,
    /// Average response latency across all concepts, milliseconds.
    pub average_response_time: f64,
    /// Preferred difficulty setting, 0-100.
    pub preferred_difficulty: f64,
    /// Observed questions per minute; 0 when unknown.
    pub study_velocity: f64,
}

impl Default for AccountStats {
    fn default() -> Self {
        Self {
            overall_accuracy: 50.0,
            average_response_time: 30_000.0,
            preferred_difficulty: 50.0,
            study_velocity: 0.0,
        }
    }
}

#[async_trait]
pub trait AccountAnalytics: Send + Sync {
    async fn account_stats(&self, user_id: &str) -> Result<AccountStats, StoreError>;
}

/// Fixed-stats implementation for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticAnalytics {
    stats: AccountStats,
}

impl StaticAnalytics {
    pub fn new(stats: AccountStats) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl AccountAnalytics for StaticAnalytics {
    async fn account_stats(&self, _user_id: &str) -> Result<AccountStats, StoreError> {
        Ok(self.stats.clone())
    }
}
