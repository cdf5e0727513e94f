//! # recall-engine - adaptive learning engine
//!
//! The scheduling and adaptation brain behind a study application: decides
//! when each concept should be practiced again and how hard the next
//! practice should be.
//!
//! Five operations make up the public surface, all exposed through
//! [`LearningEngine`]:
//!
//! - process an answer event (SM-2 scheduling + long-term difficulty, one
//!   atomic record commit)
//! - list due items by review urgency
//! - generate a time-boxed session plan
//! - adapt session difficulty from short-term performance signals
//! - predict accuracy and response time for a concept
//!
//! Persistence, content resolution and account analytics are collaborators
//! behind the [`store::MasteryStore`], [`content::ContentProvider`] and
//! [`analytics::AccountAnalytics`] traits; in-memory/static implementations
//! ship for tests and embedding.

pub mod analytics;
pub mod answer;
pub mod config;
pub mod content;
pub mod due;
pub mod engine;
pub mod error;
pub mod planner;
pub mod predictor;
pub mod store;
pub mod types;

pub use analytics::{AccountAnalytics, AccountStats, StaticAnalytics};
pub use config::{EngineConfig, PlannerConfig};
pub use content::{ContentProvider, NewConcept, StaticContentPool};
pub use engine::LearningEngine;
pub use error::EngineError;
pub use store::{InMemoryMasteryStore, MasteryStore, StoreError};
pub use types::{
    AnswerInput, ConceptContext, DifficultyAdaptation, DifficultyAdjustmentEntry,
    DifficultyDistribution, DifficultyMode, DueClass, DueFilter, MasteryRecord,
    PerformancePrediction, PlannedItem, SessionContext, SessionOptions, SessionPerformance,
    SessionPlan, SessionRequest, SessionType, MAX_ADJUSTMENT_HISTORY,
};

pub use recall_algo::{MasteryLevel, RecommendedAction};
