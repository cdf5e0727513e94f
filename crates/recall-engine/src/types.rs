//! Core data model shared across the engine services.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use recall_algo::{MasteryLevel, Sm2State, DEFAULT_DIFFICULTY, DEFAULT_EASE_FACTOR};

/// Bounded length of a record's difficulty-adjustment history.
pub const MAX_ADJUSTMENT_HISTORY: usize = 10;

/// Optional classification tags carried on a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// One entry in the bounded difficulty-adjustment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAdjustmentEntry {
    pub date: DateTime<Utc>,
    pub before: f64,
    pub after: f64,
    pub reason: String,
    pub accuracy: f64,
    /// Rolling average response latency at adjustment time, milliseconds.
    pub response_time_ms: f64,
    /// Sample-size confidence in the step, 0-100.
    pub confidence: f64,
}

/// Per-(user, concept) learning state. Created lazily on the first answer,
/// mutated only by the answer pipeline, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    pub user_id: String,
    pub concept_id: String,
    pub concept_type: String,

    // SM-2 scheduling state
    pub easiness_factor: f64,
    pub interval_days: i64,
    pub repetition: i64,
    pub next_review_date: DateTime<Utc>,

    // attempt counters
    pub total_attempts: i64,
    pub correct_attempts: i64,
    pub consecutive_correct: i64,
    pub consecutive_wrong: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempt_date: Option<DateTime<Utc>>,
    /// Rolling average response latency, milliseconds. 0 until first attempt.
    pub average_response_time: f64,

    pub mastery_level: MasteryLevel,

    // difficulty state
    pub current_difficulty: f64,
    pub optimal_difficulty: f64,
    pub adjustment_history: VecDeque<DifficultyAdjustmentEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ConceptContext>,

    /// Monotonic revision counter used for conditional writes.
    pub version: i64,
}

impl MasteryRecord {
    /// Default record for the first answer on a (user, concept) pair.
    pub fn bootstrap(
        user_id: impl Into<String>,
        concept_id: impl Into<String>,
        concept_type: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            concept_id: concept_id.into(),
            concept_type: concept_type.into(),
            easiness_factor: DEFAULT_EASE_FACTOR,
            interval_days: 1,
            repetition: 0,
            next_review_date: now,
            total_attempts: 0,
            correct_attempts: 0,
            consecutive_correct: 0,
            consecutive_wrong: 0,
            last_attempt_date: None,
            average_response_time: 0.0,
            mastery_level: MasteryLevel::Learning,
            current_difficulty: DEFAULT_DIFFICULTY,
            optimal_difficulty: DEFAULT_DIFFICULTY,
            adjustment_history: VecDeque::new(),
            context: None,
            version: 0,
        }
    }

    /// Lifetime accuracy on this concept, 0-1. Zero attempts yields 0.
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts > 0 {
            self.correct_attempts as f64 / self.total_attempts as f64
        } else {
            0.0
        }
    }

    pub fn sm2_state(&self) -> Sm2State {
        Sm2State {
            ease_factor: self.easiness_factor,
            interval_days: self.interval_days,
            repetition: self.repetition,
        }
    }

    pub fn apply_sm2_state(&mut self, state: Sm2State) {
        self.easiness_factor = state.ease_factor;
        self.interval_days = state.interval_days;
        self.repetition = state.repetition;
    }

    /// Append an adjustment entry, evicting the oldest past capacity.
    pub fn push_adjustment(&mut self, entry: DifficultyAdjustmentEntry) {
        self.adjustment_history.push_back(entry);
        while self.adjustment_history.len() > MAX_ADJUSTMENT_HISTORY {
            self.adjustment_history.pop_front();
        }
    }
}

/// One answer event submitted for processing. Callers must deduplicate
/// retries by event id before submitting; the transition is not idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub user_id: String,
    pub concept_id: String,
    pub concept_type: String,
    pub is_correct: bool,
    pub response_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub context: Option<ConceptContext>,
}

/// Review-urgency window a record falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueClass {
    Overdue,
    DueToday,
    Upcoming,
}

/// Filter accepted by the due-item selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum DueFilter {
    Overdue,
    DueToday,
    Upcoming,
    #[default]
    All,
}

impl DueFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due_today",
            Self::Upcoming => "upcoming",
            Self::All => "all",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "overdue" => Self::Overdue,
            "due_today" => Self::DueToday,
            "upcoming" => Self::Upcoming,
            _ => Self::All,
        }
    }
}

/// Kind of practice sitting being planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SessionType {
    Review,
    Learning,
    #[default]
    Mixed,
    Assessment,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Learning => "learning",
            Self::Mixed => "mixed",
            Self::Assessment => "assessment",
        }
    }
}

/// How the planner positions the difficulty mix relative to the per-type
/// distribution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum DifficultyMode {
    #[default]
    Adaptive,
    Easier,
    Harder,
}

/// Caller-tunable session options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    /// Restrict review items (and the content-pool request) to these topics.
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub difficulty_mode: DifficultyMode,
    /// Explicit share of new content, 0-1. Overrides the per-type default.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub new_content_ratio: Option<f64>,
}

/// Request for a session plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub user_id: String,
    pub session_type: SessionType,
    pub duration_minutes: u32,
    #[serde(default)]
    pub options: SessionOptions,
}

/// Percentage mix of difficulty buckets for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyDistribution {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

impl Default for DifficultyDistribution {
    fn default() -> Self {
        Self {
            easy: 30.0,
            medium: 50.0,
            hard: 20.0,
        }
    }
}

/// One planned question slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedItem {
    pub concept_id: String,
    pub concept_type: String,
    pub is_new: bool,
    pub difficulty: f64,
}

/// Ephemeral, request-scoped practice plan. Discard once expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    pub id: String,
    pub user_id: String,
    pub session_type: SessionType,
    /// Presentation order: difficulty is non-decreasing across the session.
    pub items: Vec<PlannedItem>,
    pub target_questions: usize,
    pub difficulty_distribution: DifficultyDistribution,
    /// Item indices where a break is suggested.
    pub break_points: Vec<usize>,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl SessionPlan {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.valid_until
    }
}

/// Session-scoped performance summary fed to the short-term adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPerformance {
    /// Accuracy within the session, 0-1.
    pub accuracy: f64,
    pub average_response_ms: f64,
    pub current_streak: i64,
    pub questions_answered: i64,
}

/// Where the session currently sits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub session_id: Option<String>,
    pub current_difficulty: f64,
}

/// Result of a short-term difficulty adaptation. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAdaptation {
    pub new_difficulty: f64,
    pub adjustment: f64,
    pub reasoning: String,
}

/// Ephemeral prediction payload; computed fresh, never authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePrediction {
    pub user_id: String,
    pub concept_id: String,
    pub concept_type: String,
    pub predicted_accuracy: f64,
    pub predicted_response_time: f64,
    pub confidence: f64,
    pub recommended_action: recall_algo::RecommendedAction,
    pub optimal_timing_hours: f64,
    pub generated_at: DateTime<Utc>,
}
