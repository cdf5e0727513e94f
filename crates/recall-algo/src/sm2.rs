//! SM-2 spaced-repetition scheduling.
//!
//! Classic SM-2 transition over (easiness factor, repetition count, interval).
//! The transition is intentionally not idempotent: re-applying it for the
//! same answer event moves the state again, so callers must deduplicate
//! answer submissions upstream.

use serde::{Deserialize, Serialize};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_EASE_FACTOR: f64 = 2.5;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_INTERVAL_DAYS: i64 = 1;
pub const MAX_INTERVAL_DAYS: i64 = 365;

/// Per-concept scheduling state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sm2State {
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetition: i64,
}

impl Default for Sm2State {
    fn default() -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: MIN_INTERVAL_DAYS,
            repetition: 0,
        }
    }
}

/// Apply one review with recall quality `quality` (0-5, values above 5 are
/// treated as 5).
///
/// Quality >= 3 is a success: the repetition count advances and the interval
/// follows the 1 / 6 / round(interval x EF') ladder, branching on the
/// repetition count *before* the increment. Quality < 3 resets repetition to
/// 0 and the interval to 1 day. The easiness factor is updated for every
/// grade via
///
/// `EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))`
///
/// and clamped to [1.3, 2.5]; the interval is clamped to [1, 365] days.
pub fn sm2_review(state: &Sm2State, quality: u8) -> Sm2State {
    let q = quality.min(5) as f64;

    let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    let ease_factor = (state.ease_factor + ease_delta).clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR);

    let (interval_days, repetition) = if quality < 3 {
        (MIN_INTERVAL_DAYS, 0)
    } else {
        let interval = match state.repetition {
            0 => 1,
            1 => 6,
            _ => ((state.interval_days as f64) * ease_factor).round() as i64,
        };
        (interval, state.repetition + 1)
    };

    Sm2State {
        ease_factor,
        interval_days: interval_days.clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS),
        repetition,
    }
}
