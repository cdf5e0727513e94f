//! Performance prediction.
//!
//! Deterministic weighted-average estimate of how a learner will do on a
//! concept, plus a recommended next action and review-timing hint. This is a
//! fixed-coefficient heuristic, not a trained model: the weights below sum to
//! 1.0 and every component is scored on a 0-100 scale before blending.

use serde::{Deserialize, Serialize};

use crate::difficulty::DEFAULT_DIFFICULTY;
use crate::types::{MasteryLevel, RecommendedAction};

/// Fixed score for context signals this engine does not model itself
/// (time of day, study environment). External behavioral analysis may
/// substitute a real value; absent one, this baseline applies.
pub const CONTEXTUAL_BASELINE: f64 = 75.0;

/// Blend weights for the accuracy prediction. Must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionWeights {
    pub historical: f64,
    pub recency: f64,
    pub difficulty: f64,
    pub user_skill: f64,
    pub contextual: f64,
}

impl Default for PredictionWeights {
    fn default() -> Self {
        Self {
            historical: 0.4,
            recency: 0.2,
            difficulty: 0.15,
            user_skill: 0.15,
            contextual: 0.10,
        }
    }
}

/// Snapshot of the inputs the predictor consumes. Built from a
/// `MasteryRecord` (or its absence) plus aggregate account stats.
#[derive(Debug, Clone)]
pub struct PredictionInput {
    /// Lifetime accuracy on this concept as a percentage; `None` when the
    /// concept has no attempt history.
    pub concept_accuracy: Option<f64>,
    /// Hours since the last attempt; `None` when never attempted.
    pub hours_since_last_attempt: Option<f64>,
    /// Current difficulty setting, 0-100.
    pub current_difficulty: f64,
    /// Overall account accuracy as a percentage.
    pub user_skill: f64,
    pub total_attempts: i64,
    /// Current SM-2 interval in days (0 when never scheduled).
    pub interval_days: i64,
    pub mastery_level: MasteryLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOutcome {
    /// Expected accuracy on the next attempt, 0-100.
    pub predicted_accuracy: f64,
    /// Expected response latency in milliseconds.
    pub predicted_response_time: f64,
    /// Discrete confidence band: 30 / 60 / 85 by sample size.
    pub confidence: f64,
    pub recommended_action: RecommendedAction,
    /// Suggested hours until the next review.
    pub optimal_timing_hours: f64,
}

/// Compute the performance prediction for one concept.
pub fn predict(weights: &PredictionWeights, input: &PredictionInput) -> PredictionOutcome {
    let historical = input.concept_accuracy.unwrap_or(50.0);
    // Freshness decays one point per day away from the last attempt; a
    // never-attempted concept contributes nothing here.
    let recency = match input.hours_since_last_attempt {
        Some(hours) => 100.0 - (hours.max(0.0) / 24.0).min(100.0),
        None => 0.0,
    };
    let difficulty_score = 100.0 - input.current_difficulty;

    let predicted_accuracy = (weights.historical * historical
        + weights.recency * recency
        + weights.difficulty * difficulty_score
        + weights.user_skill * input.user_skill
        + weights.contextual * CONTEXTUAL_BASELINE)
        .clamp(0.0, 100.0);

    let predicted_response_time = 30_000.0 * (input.current_difficulty / DEFAULT_DIFFICULTY)
        * ((100.0 - input.user_skill) / 100.0).max(0.5);

    let confidence = if input.total_attempts < 3 {
        30.0
    } else if input.total_attempts < 10 {
        60.0
    } else {
        85.0
    };

    let recommended_action = if predicted_accuracy < 40.0 {
        RecommendedAction::IntensiveStudy
    } else if predicted_accuracy < 70.0 {
        RecommendedAction::Practice
    } else if input.mastery_level == MasteryLevel::Mastered {
        RecommendedAction::Review
    } else {
        RecommendedAction::Practice
    };

    let optimal_timing_hours = if input.total_attempts == 0 {
        24.0
    } else {
        input.interval_days as f64 * 24.0 * (predicted_accuracy / 100.0)
    };

    PredictionOutcome {
        predicted_accuracy,
        predicted_response_time,
        confidence,
        recommended_action,
        optimal_timing_hours,
    }
}
