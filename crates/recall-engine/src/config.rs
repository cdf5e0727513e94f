//! Engine configuration.
//!
//! Every fixed numeric table lives here (or in the algo-crate config structs
//! embedded here) and is injected at [`LearningEngine::new`] time, so a
//! process can run two engines with different tuning side by side.
//!
//! [`LearningEngine::new`]: crate::engine::LearningEngine::new

use serde::{Deserialize, Serialize};

use recall_algo::{DifficultyConfig, PredictionWeights};

use crate::types::{DifficultyDistribution, DifficultyMode, SessionType};

/// Session-planner tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    /// Questions per minute assumed when analytics has no velocity data.
    pub base_rate_per_minute: f64,
    /// Bounds applied to an analytics-reported study velocity.
    pub min_rate_per_minute: f64,
    pub max_rate_per_minute: f64,
    /// Cap on due items fetched per plan.
    pub due_fetch_limit: usize,
    /// Plan validity window in hours.
    pub plan_ttl_hours: i64,
    /// Suggested minutes of practice between breaks.
    pub break_interval_minutes: f64,
    /// Overdue count above which a mixed session leans toward review.
    pub overdue_backlog_threshold: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_rate_per_minute: 2.0,
            min_rate_per_minute: 1.0,
            max_rate_per_minute: 4.0,
            due_fetch_limit: 50,
            plan_ttl_hours: 2,
            break_interval_minutes: 15.0,
            overdue_backlog_threshold: 10,
        }
    }
}

impl PlannerConfig {
    /// Default share of new content for a session type, 0-1.
    pub fn new_content_ratio(&self, session_type: SessionType, overdue_backlog: usize) -> f64 {
        match session_type {
            SessionType::Review => 0.2,
            SessionType::Learning => 0.8,
            SessionType::Mixed => {
                if overdue_backlog > self.overdue_backlog_threshold {
                    0.3
                } else {
                    0.5
                }
            }
            SessionType::Assessment => 0.0,
        }
    }

    /// Difficulty mix for a session type, shifted by the difficulty mode.
    pub fn difficulty_distribution(
        &self,
        session_type: SessionType,
        mode: DifficultyMode,
    ) -> DifficultyDistribution {
        let base = match session_type {
            SessionType::Learning => DifficultyDistribution {
                easy: 40.0,
                medium: 45.0,
                hard: 15.0,
            },
            SessionType::Assessment => DifficultyDistribution {
                easy: 20.0,
                medium: 50.0,
                hard: 30.0,
            },
            SessionType::Review | SessionType::Mixed => DifficultyDistribution::default(),
        };

        // Easier/harder shift 10 points between the outer buckets.
        match mode {
            DifficultyMode::Adaptive => base,
            DifficultyMode::Easier => DifficultyDistribution {
                easy: (base.easy + 10.0).min(100.0),
                medium: base.medium,
                hard: (base.hard - 10.0).max(0.0),
            },
            DifficultyMode::Harder => DifficultyDistribution {
                easy: (base.easy - 10.0).max(0.0),
                medium: base.medium,
                hard: (base.hard + 10.0).min(100.0),
            },
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub difficulty: DifficultyConfig,
    pub planner: PlannerConfig,
    pub prediction: PredictionWeights,
}
