//! Engine facade.
//!
//! Thin orchestration layer over the service modules, wired to the three
//! collaborator interfaces at construction time. All scheduling math and
//! fixed numeric tables come in through [`EngineConfig`]; the engine itself
//! holds no mutable state beyond what lives in the mastery store.

use std::sync::Arc;

use chrono::Utc;

use recall_algo::adjust_session;

use crate::analytics::AccountAnalytics;
use crate::answer;
use crate::config::EngineConfig;
use crate::content::ContentProvider;
use crate::due;
use crate::error::EngineError;
use crate::planner;
use crate::predictor;
use crate::store::MasteryStore;
use crate::types::{
    AnswerInput, DifficultyAdaptation, DueFilter, MasteryRecord, PerformancePrediction,
    SessionContext, SessionPerformance, SessionPlan, SessionRequest,
};

pub struct LearningEngine {
    store: Arc<dyn MasteryStore>,
    content: Arc<dyn ContentProvider>,
    analytics: Arc<dyn AccountAnalytics>,
    config: EngineConfig,
}

impl LearningEngine {
    pub fn new(
        store: Arc<dyn MasteryStore>,
        content: Arc<dyn ContentProvider>,
        analytics: Arc<dyn AccountAnalytics>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            content,
            analytics,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Process one answer event. Not idempotent: deduplicate retries by
    /// event id before calling.
    pub async fn process_answer(&self, input: &AnswerInput) -> Result<MasteryRecord, EngineError> {
        answer::process_answer(self.store.as_ref(), &self.config, input, Utc::now()).await
    }

    /// Records matching the urgency filter, most urgent first.
    pub async fn due_items(
        &self,
        user_id: &str,
        limit: usize,
        filter: DueFilter,
    ) -> Result<Vec<MasteryRecord>, EngineError> {
        due::due_items(self.store.as_ref(), user_id, limit, filter, Utc::now()).await
    }

    /// Assemble a time-boxed practice session.
    pub async fn generate_session_plan(
        &self,
        request: &SessionRequest,
    ) -> Result<SessionPlan, EngineError> {
        planner::generate_session_plan(
            self.store.as_ref(),
            self.content.as_ref(),
            self.analytics.as_ref(),
            &self.config,
            request,
            Utc::now(),
        )
        .await
    }

    /// Short-term (session-scoped) difficulty adaptation. Pure and
    /// side-effect free: the result applies to the running session only and
    /// is never written back to any record.
    pub fn adapt_difficulty(
        &self,
        user_id: &str,
        performance: &SessionPerformance,
        context: &SessionContext,
    ) -> DifficultyAdaptation {
        let signals = recall_algo::SessionSignals {
            accuracy: performance.accuracy,
            average_response_ms: performance.average_response_ms,
            current_streak: performance.current_streak,
            questions_answered: performance.questions_answered,
        };
        let adjustment =
            adjust_session(&self.config.difficulty, context.current_difficulty, &signals);
        let reasoning = adaptation_reasoning(&self.config, performance, &adjustment);

        tracing::debug!(
            user_id = %user_id,
            session_id = context.session_id.as_deref().unwrap_or("-"),
            delta = adjustment.delta,
            new_difficulty = adjustment.new_difficulty,
            "session difficulty adapted"
        );

        DifficultyAdaptation {
            new_difficulty: adjustment.new_difficulty,
            adjustment: adjustment.delta,
            reasoning,
        }
    }

    /// Predict performance on one concept from current state.
    pub async fn performance_prediction(
        &self,
        user_id: &str,
        concept_id: &str,
        concept_type: &str,
    ) -> Result<PerformancePrediction, EngineError> {
        predictor::performance_prediction(
            self.store.as_ref(),
            self.analytics.as_ref(),
            &self.config,
            user_id,
            concept_id,
            concept_type,
            Utc::now(),
        )
        .await
    }
}

fn adaptation_reasoning(
    config: &EngineConfig,
    performance: &SessionPerformance,
    adjustment: &recall_algo::SessionAdjustment,
) -> String {
    let accuracy_pct = (performance.accuracy * 100.0).round() as i64;
    let target_pct = (config.difficulty.target_accuracy * 100.0).round() as i64;

    if performance.questions_answered < 3 && adjustment.delta.abs() < 1.0 {
        return format!(
            "only {} answers so far, holding difficulty until the sample grows",
            performance.questions_answered
        );
    }
    if adjustment.delta >= 1.0 {
        let mut parts = vec![format!("accuracy {accuracy_pct}% against a {target_pct}% target")];
        if adjustment.streak_factor > 0.0 {
            parts.push(format!(
                "{} correct in a row",
                performance.current_streak
            ));
        }
        if adjustment.speed_factor > 0.0 {
            parts.push("responses faster than the 30s reference".to_string());
        }
        format!(
            "{}; raising difficulty by {:.1}",
            parts.join(" and "),
            adjustment.delta
        )
    } else if adjustment.delta <= -1.0 {
        format!(
            "accuracy {accuracy_pct}% below the {target_pct}% target; easing difficulty by {:.1}",
            adjustment.delta.abs()
        )
    } else {
        format!("accuracy {accuracy_pct}% is near target; difficulty unchanged")
    }
}
