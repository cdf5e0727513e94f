//! Performance prediction service.
//!
//! Read-only: snapshots the mastery record (or its absence) plus aggregate
//! account stats and hands the numbers to the algo-crate predictor. Nothing
//! here is ever persisted; predictions are recomputed on demand.

use chrono::{DateTime, Utc};

use recall_algo::{predict, MasteryLevel, PredictionInput};

use crate::analytics::{AccountAnalytics, AccountStats};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::store::MasteryStore;
use crate::types::PerformancePrediction;

/// Predict accuracy, response time and the recommended next action for one
/// concept. A concept with no record predicts from neutral defaults.
pub async fn performance_prediction(
    store: &dyn MasteryStore,
    analytics: &dyn AccountAnalytics,
    config: &EngineConfig,
    user_id: &str,
    concept_id: &str,
    concept_type: &str,
    now: DateTime<Utc>,
) -> Result<PerformancePrediction, EngineError> {
    if user_id.is_empty() || concept_id.is_empty() {
        return Err(EngineError::InvalidInput(
            "userId and conceptId are required".to_string(),
        ));
    }

    let record = store.get(user_id, concept_id).await?;
    let stats = match analytics.account_stats(user_id).await {
        Ok(stats) => stats,
        Err(err) => {
            tracing::warn!(user_id = %user_id, error = %err,
                "analytics unavailable, predicting with defaults");
            AccountStats::default()
        }
    };

    let input = match &record {
        Some(record) => PredictionInput {
            concept_accuracy: (record.total_attempts > 0).then(|| record.accuracy() * 100.0),
            hours_since_last_attempt: record
                .last_attempt_date
                .map(|date| (now - date).num_seconds().max(0) as f64 / 3600.0),
            current_difficulty: record.current_difficulty,
            user_skill: stats.overall_accuracy,
            total_attempts: record.total_attempts,
            interval_days: record.interval_days,
            mastery_level: record.mastery_level,
        },
        None => PredictionInput {
            concept_accuracy: None,
            hours_since_last_attempt: None,
            current_difficulty: recall_algo::DEFAULT_DIFFICULTY,
            user_skill: stats.overall_accuracy,
            total_attempts: 0,
            interval_days: 0,
            mastery_level: MasteryLevel::Learning,
        },
    };

    let outcome = predict(&config.prediction, &input);

    Ok(PerformancePrediction {
        user_id: user_id.to_string(),
        concept_id: concept_id.to_string(),
        concept_type: record
            .map(|record| record.concept_type)
            .unwrap_or_else(|| concept_type.to_string()),
        predicted_accuracy: outcome.predicted_accuracy,
        predicted_response_time: outcome.predicted_response_time,
        confidence: outcome.confidence,
        recommended_action: outcome.recommended_action,
        optimal_timing_hours: outcome.optimal_timing_hours,
        generated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::StaticAnalytics;
    use crate::store::InMemoryMasteryStore;
    use crate::types::MasteryRecord;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn unseen_concept_predicts_from_defaults() {
        let store = InMemoryMasteryStore::new();
        let prediction = performance_prediction(
            &store,
            &StaticAnalytics::default(),
            &EngineConfig::default(),
            "u1",
            "brand-new",
            "exam_question",
            now(),
        )
        .await
        .unwrap();

        assert!(prediction.predicted_accuracy.is_finite());
        assert!((0.0..=100.0).contains(&prediction.predicted_accuracy));
        assert!(prediction.predicted_response_time.is_finite());
        assert_eq!(prediction.confidence, 30.0);
        assert_eq!(prediction.optimal_timing_hours, 24.0);
        assert_eq!(prediction.concept_type, "exam_question");
    }

    #[tokio::test]
    async fn seasoned_record_feeds_the_blend() {
        let store = InMemoryMasteryStore::new();
        let mut record = MasteryRecord::bootstrap("u1", "c1", "topic", now());
        record.total_attempts = 12;
        record.correct_attempts = 11;
        record.repetition = 4;
        record.interval_days = 35;
        record.mastery_level = MasteryLevel::Mastered;
        record.last_attempt_date = Some(now() - Duration::hours(6));
        record.current_difficulty = 35.0;
        store.put(&record).await.unwrap();

        let prediction = performance_prediction(
            &store,
            &StaticAnalytics::default(),
            &EngineConfig::default(),
            "u1",
            "c1",
            "ignored",
            now(),
        )
        .await
        .unwrap();

        assert_eq!(prediction.confidence, 85.0);
        assert_eq!(prediction.concept_type, "topic");
        assert!(prediction.predicted_accuracy > 70.0);
        assert_eq!(
            prediction.recommended_action,
            recall_algo::RecommendedAction::Review
        );
        let expected_timing = 35.0 * 24.0 * (prediction.predicted_accuracy / 100.0);
        assert!((prediction.optimal_timing_hours - expected_timing).abs() < 1e-9);
    }
}
