//! Recall-quality scoring.
//!
//! Maps a raw answer event (correct/incorrect plus observed latency) onto the
//! 0-5 quality scale consumed by the SM-2 scheduler. The latency thresholds
//! are relative to the learner's rolling average response time for the
//! concept, so a slow-but-correct answer from a habitually fast learner
//! scores lower than the same latency from a slow one.

/// Neutral rolling-average latency used until a concept has attempt history.
pub const DEFAULT_AVG_RESPONSE_MS: f64 = 30_000.0;

/// Grade an answer on the 0-5 recall scale.
///
/// `average_response_ms` is the record's rolling average latency; pass a
/// non-positive value for a brand-new record and the neutral default applies.
///
/// Incorrect answers grade 0-2 (slower is worse), correct answers grade 3-5
/// (faster is better). Within each correctness branch the grade is monotonic
/// non-increasing in latency.
pub fn recall_quality(is_correct: bool, response_time_ms: f64, average_response_ms: f64) -> u8 {
    let avg = if average_response_ms > 0.0 {
        average_response_ms
    } else {
        DEFAULT_AVG_RESPONSE_MS
    };
    let latency = response_time_ms.max(0.0);

    if is_correct {
        if latency < avg * 0.5 {
            5
        } else if latency < avg * 0.75 {
            4
        } else {
            3
        }
    } else if latency > avg * 2.0 {
        0
    } else if latency > avg * 1.5 {
        1
    } else {
        2
    }
}
