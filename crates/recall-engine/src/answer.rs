//! Answer processing.
//!
//! One answer event performs one read-modify-write against exactly one
//! mastery record: grade the answer, run the SM-2 transition, refresh the
//! counters, reclassify mastery, apply the long-term difficulty step, and
//! commit everything as a single conditional write. Losing the version race
//! surfaces as a retryable conflict rather than silently dropping half of
//! the derived state.
//!
//! The transition is not idempotent. Retried submissions must be
//! deduplicated by the caller (idempotency key) before reaching this module.

use chrono::{DateTime, Duration, Utc};

use recall_algo::{classify_mastery, recall_quality, sm2_review};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::store::MasteryStore;
use crate::types::{AnswerInput, DifficultyAdjustmentEntry, MasteryRecord};

/// Process one answer event and return the updated record.
pub async fn process_answer(
    store: &dyn MasteryStore,
    config: &EngineConfig,
    input: &AnswerInput,
    now: DateTime<Utc>,
) -> Result<MasteryRecord, EngineError> {
    if input.user_id.is_empty() || input.concept_id.is_empty() {
        return Err(EngineError::InvalidInput(
            "userId and conceptId are required".to_string(),
        ));
    }
    if !input.response_time_ms.is_finite() || input.response_time_ms < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "responseTimeMs must be a non-negative number, got {}",
            input.response_time_ms
        )));
    }

    let mut record = store
        .get(&input.user_id, &input.concept_id)
        .await?
        .unwrap_or_else(|| {
            MasteryRecord::bootstrap(&input.user_id, &input.concept_id, &input.concept_type, now)
        });
    let expected_version = record.version;

    if input.context.is_some() {
        record.context = input.context.clone();
    }

    // Grade against the average latency *before* this attempt folds in.
    let quality = recall_quality(
        input.is_correct,
        input.response_time_ms,
        record.average_response_time,
    );

    let next = sm2_review(&record.sm2_state(), quality);
    record.apply_sm2_state(next);
    record.next_review_date = now + Duration::days(record.interval_days);

    record.total_attempts += 1;
    if input.is_correct {
        record.correct_attempts += 1;
        record.consecutive_correct += 1;
        record.consecutive_wrong = 0;
    } else {
        record.consecutive_wrong += 1;
        record.consecutive_correct = 0;
    }
    let n = record.total_attempts as f64;
    record.average_response_time =
        (record.average_response_time * (n - 1.0) + input.response_time_ms) / n;
    record.last_attempt_date = Some(now);

    record.mastery_level = classify_mastery(
        record.total_attempts,
        record.correct_attempts,
        record.repetition,
        record.interval_days,
    );

    if let Some(adjustment) = recall_algo::adjust_long_term(
        &config.difficulty,
        record.current_difficulty,
        record.total_attempts,
        record.correct_attempts,
    ) {
        tracing::info!(
            user_id = %record.user_id,
            concept_id = %record.concept_id,
            before = adjustment.before,
            after = adjustment.after,
            reason = adjustment.reason,
            "long-term difficulty adjustment"
        );
        record.current_difficulty = adjustment.after;
        record.push_adjustment(DifficultyAdjustmentEntry {
            date: now,
            before: adjustment.before,
            after: adjustment.after,
            reason: adjustment.reason.to_string(),
            accuracy: adjustment.accuracy,
            response_time_ms: record.average_response_time,
            confidence: adjustment.confidence,
        });
    }

    record.version = expected_version + 1;
    store.put_versioned(&record, expected_version).await?;

    tracing::debug!(
        user_id = %record.user_id,
        concept_id = %record.concept_id,
        quality,
        repetition = record.repetition,
        interval_days = record.interval_days,
        ease_factor = record.easiness_factor,
        mastery = record.mastery_level.as_str(),
        "answer processed"
    );

    Ok(record)
}
