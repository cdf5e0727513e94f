//! End-to-end tests for the learning engine against the in-memory store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use recall_engine::{
    AccountStats, AnswerInput, DueFilter, EngineConfig, InMemoryMasteryStore, LearningEngine,
    MasteryLevel, MasteryStore, NewConcept, SessionContext, SessionOptions, SessionPerformance,
    SessionRequest, SessionType, StaticAnalytics, StaticContentPool,
};

fn engine_with(store: Arc<InMemoryMasteryStore>) -> LearningEngine {
    let pool = StaticContentPool::new(
        (0..50)
            .map(|n| NewConcept {
                concept_id: format!("fresh-{n}"),
                concept_type: "exam_question".to_string(),
                difficulty: 35.0 + n as f64,
                topic: None,
            })
            .collect(),
    );
    LearningEngine::new(
        store,
        Arc::new(pool),
        Arc::new(StaticAnalytics::new(AccountStats {
            overall_accuracy: 72.0,
            average_response_time: 24_000.0,
            preferred_difficulty: 55.0,
            study_velocity: 0.0,
        })),
        EngineConfig::default(),
    )
}

fn answer(concept: &str, is_correct: bool, response_time_ms: f64) -> AnswerInput {
    AnswerInput {
        user_id: "learner".to_string(),
        concept_id: concept.to_string(),
        concept_type: "exam_question".to_string(),
        is_correct,
        response_time_ms,
        context: None,
    }
}

#[tokio::test]
async fn first_answer_creates_record_with_defaults_applied() {
    let store = Arc::new(InMemoryMasteryStore::new());
    let engine = engine_with(Arc::clone(&store));

    let record = engine
        .process_answer(&answer("c1", true, 8_000.0))
        .await
        .unwrap();

    assert_eq!(record.total_attempts, 1);
    assert_eq!(record.repetition, 1);
    assert_eq!(record.interval_days, 1);
    assert_eq!(record.easiness_factor, 2.5);
    assert_eq!(record.mastery_level, MasteryLevel::Learning);
    assert_eq!(record.version, 1);

    let stored = store.get("learner", "c1").await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.total_attempts, 1);
}

#[tokio::test]
async fn schedule_grows_along_the_success_ladder() {
    let store = Arc::new(InMemoryMasteryStore::new());
    let engine = engine_with(Arc::clone(&store));

    // Latencies stay under half the rolling average, so every grade is a 5
    // and the easiness factor holds at 2.5.
    let first = engine
        .process_answer(&answer("c1", true, 8_000.0))
        .await
        .unwrap();
    assert_eq!(first.interval_days, 1);

    let second = engine
        .process_answer(&answer("c1", true, 3_000.0))
        .await
        .unwrap();
    assert_eq!(second.interval_days, 6);
    assert_eq!(second.repetition, 2);

    let third = engine
        .process_answer(&answer("c1", true, 1_000.0))
        .await
        .unwrap();
    assert_eq!(third.easiness_factor, 2.5);
    assert_eq!(third.interval_days, 15);
    assert_eq!(third.repetition, 3);
}

#[tokio::test]
async fn invariants_hold_across_a_mixed_run() {
    let store = Arc::new(InMemoryMasteryStore::new());
    let engine = engine_with(Arc::clone(&store));

    let outcomes = [
        true, true, false, true, false, false, true, true, true, false, true, true,
    ];
    for (n, is_correct) in outcomes.iter().enumerate() {
        let record = engine
            .process_answer(&answer("c1", *is_correct, 5_000.0 + n as f64 * 7_000.0))
            .await
            .unwrap();

        assert!((1.3..=2.5).contains(&record.easiness_factor));
        assert!((1..=365).contains(&record.interval_days));
        assert!(record.repetition >= 0);
        assert!(record.correct_attempts <= record.total_attempts);
        assert!((0.0..=100.0).contains(&record.current_difficulty));
        assert!(record.adjustment_history.len() <= 10);
        assert_eq!(record.version, n as i64 + 1);
    }
}

#[tokio::test]
async fn due_items_sees_freshly_processed_records() {
    let store = Arc::new(InMemoryMasteryStore::new());
    let engine = engine_with(Arc::clone(&store));

    engine
        .process_answer(&answer("c1", false, 20_000.0))
        .await
        .unwrap();

    // Failed concept reschedules one day out: upcoming, not overdue.
    let overdue = engine
        .due_items("learner", 10, DueFilter::Overdue)
        .await
        .unwrap();
    assert!(overdue.is_empty());

    let all = engine.due_items("learner", 10, DueFilter::All).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].concept_id, "c1");
}

#[tokio::test]
async fn overdue_selection_honors_the_24h_boundary_and_order() {
    let store = Arc::new(InMemoryMasteryStore::new());
    let engine = engine_with(Arc::clone(&store));
    let now = Utc::now();

    for (concept, hours_past) in [("c-borderline", 23), ("c-old", 26), ("c-ancient", 90)] {
        let mut record = recall_engine::MasteryRecord::bootstrap(
            "learner",
            concept,
            "exam_question",
            now,
        );
        record.next_review_date = now - Duration::hours(hours_past);
        store.put(&record).await.unwrap();
    }

    let overdue = engine
        .due_items("learner", 10, DueFilter::Overdue)
        .await
        .unwrap();
    let ids: Vec<&str> = overdue.iter().map(|r| r.concept_id.as_str()).collect();
    assert_eq!(ids, vec!["c-ancient", "c-old"]);
}

#[tokio::test]
async fn session_plan_end_to_end() {
    let store = Arc::new(InMemoryMasteryStore::new());
    let engine = engine_with(Arc::clone(&store));
    let now = Utc::now();

    for n in 0..12 {
        let mut record = recall_engine::MasteryRecord::bootstrap(
            "learner",
            format!("seen-{n}"),
            "exam_question",
            now,
        );
        record.next_review_date = now - Duration::days(2);
        record.current_difficulty = 30.0 + n as f64 * 4.0;
        store.put(&record).await.unwrap();
    }

    let plan = engine
        .generate_session_plan(&SessionRequest {
            user_id: "learner".to_string(),
            session_type: SessionType::Mixed,
            duration_minutes: 10,
            options: SessionOptions::default(),
        })
        .await
        .unwrap();

    assert_eq!(plan.target_questions, 20);
    assert!(plan.items.len() <= plan.target_questions);
    assert!(!plan.items.is_empty());

    let mut ids = std::collections::HashSet::new();
    for pair in plan.items.windows(2) {
        assert!(pair[0].difficulty <= pair[1].difficulty);
    }
    for item in &plan.items {
        assert!(ids.insert(item.concept_id.clone()), "repeated concept id");
    }
    assert!(plan.valid_until > plan.created_at);
    assert_eq!(plan.valid_until - plan.created_at, Duration::hours(2));
}

#[tokio::test]
async fn empty_account_still_plans_successfully() {
    let store = Arc::new(InMemoryMasteryStore::new());
    let engine = LearningEngine::new(
        store,
        Arc::new(StaticContentPool::default()),
        Arc::new(StaticAnalytics::default()),
        EngineConfig::default(),
    );

    let plan = engine
        .generate_session_plan(&SessionRequest {
            user_id: "learner".to_string(),
            session_type: SessionType::Review,
            duration_minutes: 20,
            options: SessionOptions::default(),
        })
        .await
        .unwrap();

    assert!(plan.items.is_empty());
    assert_eq!(plan.target_questions, 40);
}

#[tokio::test]
async fn adaptation_and_prediction_round_out_the_surface() {
    let store = Arc::new(InMemoryMasteryStore::new());
    let engine = engine_with(Arc::clone(&store));

    for _ in 0..6 {
        engine
            .process_answer(&answer("c1", true, 9_000.0))
            .await
            .unwrap();
    }

    let adaptation = engine.adapt_difficulty(
        "learner",
        &SessionPerformance {
            accuracy: 0.9,
            average_response_ms: 10_000.0,
            current_streak: 6,
            questions_answered: 6,
        },
        &SessionContext {
            session_id: None,
            current_difficulty: 50.0,
        },
    );
    assert!((0.0..=100.0).contains(&adaptation.new_difficulty));
    assert!(!adaptation.reasoning.is_empty());

    let prediction = engine
        .performance_prediction("learner", "c1", "exam_question")
        .await
        .unwrap();
    assert!((0.0..=100.0).contains(&prediction.predicted_accuracy));
    assert!(prediction.predicted_response_time >= 0.0);
    assert_eq!(prediction.confidence, 60.0);

    let unseen = engine
        .performance_prediction("learner", "never-seen", "exam_question")
        .await
        .unwrap();
    assert_eq!(unseen.optimal_timing_hours, 24.0);
    assert_eq!(unseen.confidence, 30.0);
}
