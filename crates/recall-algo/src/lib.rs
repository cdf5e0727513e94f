//! # recall-algo - adaptive practice scheduling algorithms
//!
//! Pure-Rust building blocks for the recall learning engine:
//!
//! - **Quality scoring** - grades a raw answer event on the 0-5 recall scale
//! - **SM-2 scheduling** - easiness factor, repetition count and review interval
//! - **Difficulty adaptation** - long-term (per-concept) and short-term
//!   (per-session) difficulty heuristics, kept as two separate code paths
//! - **Mastery classification** - learning / reviewing / mastered labels
//! - **Performance prediction** - weighted-average accuracy and response-time
//!   estimates with a recommended next action
//!
//! Everything here is deterministic and side-effect free: no clock reads, no
//! I/O, no randomness. Callers pass the current time and state in and get the
//! next state back, which keeps the numeric transitions reproducible and easy
//! to property-test.

pub mod difficulty;
pub mod mastery;
pub mod prediction;
pub mod quality;
pub mod sm2;
pub mod types;

pub use types::{MasteryLevel, RecommendedAction};

pub use quality::{recall_quality, DEFAULT_AVG_RESPONSE_MS};

pub use sm2::{
    sm2_review, Sm2State, DEFAULT_EASE_FACTOR, MAX_EASE_FACTOR, MAX_INTERVAL_DAYS,
    MIN_EASE_FACTOR, MIN_INTERVAL_DAYS,
};

pub use difficulty::{
    adjust_long_term, adjust_session, DifficultyConfig, LongTermAdjustment, SessionAdjustment,
    SessionSignals, DEFAULT_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY,
};

pub use mastery::classify_mastery;

pub use prediction::{predict, PredictionInput, PredictionOutcome, PredictionWeights};
