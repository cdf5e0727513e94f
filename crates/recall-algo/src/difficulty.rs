//! Difficulty adaptation heuristics.
//!
//! Two independent mechanisms share this module but never share state:
//!
//! - [`adjust_long_term`] nudges a concept's persisted 0-100 difficulty from
//!   rolling accuracy, one step per answer at most.
//! - [`adjust_session`] blends four session-scoped signals into one bounded
//!   delta for the current sitting. Its output is never persisted.
//!
//! Keeping the two paths separate is deliberate; they overlap on purpose and
//! merging them would change observable behavior.

use serde::{Deserialize, Serialize};

pub const MIN_DIFFICULTY: f64 = 0.0;
pub const MAX_DIFFICULTY: f64 = 100.0;
pub const DEFAULT_DIFFICULTY: f64 = 50.0;

/// Fixed thresholds for both adaptation paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Accuracy the adapter steers toward.
    pub target_accuracy: f64,
    /// Dead band around the target before any long-term step fires.
    pub accuracy_band: f64,
    /// Attempts required before difficulty may rise.
    pub raise_min_attempts: i64,
    /// Attempts required before difficulty may drop.
    pub lower_min_attempts: i64,
    /// Long-term step size in difficulty points.
    pub step: f64,
    /// Reference latency for the session speed factor.
    pub optimal_response_ms: f64,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            target_accuracy: 0.75,
            accuracy_band: 0.10,
            raise_min_attempts: 5,
            lower_min_attempts: 3,
            step: 5.0,
            optimal_response_ms: 30_000.0,
        }
    }
}

/// Outcome of a long-term difficulty step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongTermAdjustment {
    pub before: f64,
    pub after: f64,
    pub reason: &'static str,
    pub accuracy: f64,
    /// Sample-size confidence in the step, 0-100.
    pub confidence: f64,
}

/// Long-term per-concept adjustment, run after every answer.
///
/// Returns `None` when accuracy sits inside the dead band or the attempt
/// count is too small; no history entry should be written in that case.
pub fn adjust_long_term(
    config: &DifficultyConfig,
    current_difficulty: f64,
    total_attempts: i64,
    correct_attempts: i64,
) -> Option<LongTermAdjustment> {
    let accuracy = if total_attempts > 0 {
        correct_attempts as f64 / total_attempts as f64
    } else {
        0.0
    };

    let (delta, reason) = if accuracy > config.target_accuracy + config.accuracy_band
        && total_attempts >= config.raise_min_attempts
    {
        (config.step, "high accuracy")
    } else if accuracy < config.target_accuracy - config.accuracy_band
        && total_attempts >= config.lower_min_attempts
    {
        (-config.step, "low accuracy")
    } else {
        return None;
    };

    let after = (current_difficulty + delta).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    Some(LongTermAdjustment {
        before: current_difficulty,
        after,
        reason,
        accuracy,
        confidence: (total_attempts as f64 / 10.0 * 100.0).min(100.0),
    })
}

/// Session-scoped performance signals for the short-term adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSignals {
    /// Accuracy within the current session, 0-1.
    pub accuracy: f64,
    /// Average response latency within the session, milliseconds.
    pub average_response_ms: f64,
    /// Current streak of consecutive correct answers.
    pub current_streak: i64,
    /// Questions answered so far in the session.
    pub questions_answered: i64,
}

/// Breakdown of a short-term adaptation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAdjustment {
    pub new_difficulty: f64,
    pub delta: f64,
    pub accuracy_factor: f64,
    pub speed_factor: f64,
    pub streak_factor: f64,
    pub confidence_factor: f64,
}

/// Short-term per-session adaptation. Combines accuracy, speed, streak and a
/// sample-size confidence weight into one clamped delta. Not persisted.
pub fn adjust_session(
    config: &DifficultyConfig,
    current_difficulty: f64,
    signals: &SessionSignals,
) -> SessionAdjustment {
    let accuracy_factor = ((signals.accuracy - config.target_accuracy) * 20.0).clamp(-10.0, 10.0);

    let optimal = config.optimal_response_ms;
    let speed_factor = if signals.average_response_ms < optimal * 0.5 {
        2.0
    } else if signals.average_response_ms < optimal {
        1.0
    } else if signals.average_response_ms < optimal * 2.0 {
        0.0
    } else {
        -1.0
    };

    let streak_factor = signals.current_streak.clamp(0, 5) as f64;
    let confidence_factor = (signals.questions_answered as f64 / 10.0).min(1.0);

    let raw = confidence_factor * (accuracy_factor + speed_factor + streak_factor) / 3.0;
    let cap = if signals.questions_answered > 5 {
        15.0
    } else {
        10.0
    };
    let delta = raw.clamp(-cap, cap);

    SessionAdjustment {
        new_difficulty: (current_difficulty + delta).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
        delta,
        accuracy_factor,
        speed_factor,
        streak_factor,
        confidence_factor,
    }
}
