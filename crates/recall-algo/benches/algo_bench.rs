use criterion::{black_box, criterion_group, criterion_main, Criterion};

use recall_algo::{
    adjust_session, predict, recall_quality, sm2_review, DifficultyConfig, MasteryLevel,
    PredictionInput, PredictionWeights, SessionSignals, Sm2State,
};

fn bench_sm2(c: &mut Criterion) {
    c.bench_function("sm2_review_success", |b| {
        let state = Sm2State {
            ease_factor: 2.1,
            interval_days: 14,
            repetition: 4,
        };
        b.iter(|| sm2_review(black_box(&state), black_box(4)))
    });

    c.bench_function("sm2_ten_review_trajectory", |b| {
        b.iter(|| {
            let mut state = Sm2State::default();
            for quality in [5, 4, 3, 5, 2, 4, 5, 5, 3, 4] {
                state = sm2_review(black_box(&state), quality);
            }
            state
        })
    });
}

fn bench_quality(c: &mut Criterion) {
    c.bench_function("recall_quality", |b| {
        b.iter(|| recall_quality(black_box(true), black_box(12_000.0), black_box(28_000.0)))
    });
}

fn bench_difficulty(c: &mut Criterion) {
    let config = DifficultyConfig::default();
    let signals = SessionSignals {
        accuracy: 0.8,
        average_response_ms: 22_000.0,
        current_streak: 3,
        questions_answered: 12,
    };
    c.bench_function("adjust_session", |b| {
        b.iter(|| adjust_session(black_box(&config), black_box(55.0), black_box(&signals)))
    });
}

fn bench_prediction(c: &mut Criterion) {
    let weights = PredictionWeights::default();
    let input = PredictionInput {
        concept_accuracy: Some(82.0),
        hours_since_last_attempt: Some(36.0),
        current_difficulty: 60.0,
        user_skill: 71.0,
        total_attempts: 14,
        interval_days: 15,
        mastery_level: MasteryLevel::Reviewing,
    };
    c.bench_function("predict", |b| {
        b.iter(|| predict(black_box(&weights), black_box(&input)))
    });
}

criterion_group!(
    benches,
    bench_sm2,
    bench_quality,
    bench_difficulty,
    bench_prediction
);
criterion_main!(benches);
