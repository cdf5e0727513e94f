//! Session planning.
//!
//! Assembles a time-boxed practice set: a review slice drawn from the due
//! pool (overdue first), topped up with new concepts from the content pool,
//! presented easiest-to-hardest with break points spaced across the sitting.
//! Plans are ephemeral values with a two-hour validity window; fewer
//! available items than requested is a successful, smaller plan.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::analytics::{AccountAnalytics, AccountStats};
use crate::config::EngineConfig;
use crate::content::ContentProvider;
use crate::due::{classify_due, is_due, sort_by_urgency};
use crate::error::EngineError;
use crate::store::MasteryStore;
use crate::types::{DueClass, MasteryRecord, PlannedItem, SessionPlan, SessionRequest};

/// Build a session plan for one practice sitting.
pub async fn generate_session_plan(
    store: &dyn MasteryStore,
    content: &dyn ContentProvider,
    analytics: &dyn AccountAnalytics,
    config: &EngineConfig,
    request: &SessionRequest,
    now: DateTime<Utc>,
) -> Result<SessionPlan, EngineError> {
    if request.user_id.is_empty() {
        return Err(EngineError::InvalidInput("userId is required".to_string()));
    }
    if request.duration_minutes == 0 {
        return Err(EngineError::InvalidInput(
            "durationMinutes must be positive".to_string(),
        ));
    }

    let stats = match analytics.account_stats(&request.user_id).await {
        Ok(stats) => stats,
        Err(err) => {
            tracing::warn!(user_id = %request.user_id, error = %err,
                "analytics unavailable, planning with defaults");
            AccountStats::default()
        }
    };

    let rate = question_rate(&config.planner, &stats);
    let target_questions = (request.duration_minutes as f64 * rate).floor() as usize;

    // Review pool: due records, overdue first, optionally topic-filtered.
    let records = store.query(&request.user_id).await?;
    let known_ids: HashSet<String> = records.iter().map(|r| r.concept_id.clone()).collect();

    let topics = &request.options.topics;
    let mut due_pool: Vec<MasteryRecord> = records
        .into_iter()
        .filter(|record| is_due(record, now))
        .filter(|record| topic_matches(record, topics))
        .collect();
    sort_by_urgency(&mut due_pool, now);
    due_pool.truncate(config.planner.due_fetch_limit);

    let overdue_backlog = due_pool
        .iter()
        .filter(|record| classify_due(record.next_review_date, now) == Some(DueClass::Overdue))
        .count();

    let new_ratio = request
        .options
        .new_content_ratio
        .map(|ratio| ratio.clamp(0.0, 1.0))
        .unwrap_or_else(|| {
            config
                .planner
                .new_content_ratio(request.session_type, overdue_backlog)
        });

    let review_target = ((target_questions as f64) * (1.0 - new_ratio)).floor() as usize;

    let mut items: Vec<PlannedItem> = Vec::with_capacity(target_questions);
    let mut seen: HashSet<String> = HashSet::new();
    for record in due_pool.into_iter().take(review_target) {
        if seen.insert(record.concept_id.clone()) {
            items.push(PlannedItem {
                concept_id: record.concept_id,
                concept_type: record.concept_type,
                is_new: false,
                difficulty: record.current_difficulty,
            });
        }
    }

    // Whatever the review slice could not fill falls to new content.
    let new_needed = target_questions.saturating_sub(items.len());
    if new_needed > 0 {
        // Over-fetch so exclusions still leave enough candidates.
        let candidates = content
            .candidate_concepts(&request.user_id, topics, new_needed * 2)
            .await?;
        for concept in candidates {
            if items.len() >= target_questions {
                break;
            }
            if known_ids.contains(&concept.concept_id) || !seen.insert(concept.concept_id.clone())
            {
                continue;
            }
            items.push(PlannedItem {
                concept_id: concept.concept_id,
                concept_type: concept.concept_type,
                is_new: true,
                difficulty: concept.difficulty,
            });
        }
    }

    // Easiest first; stable, so urgency order survives within equal
    // difficulty.
    items.sort_by(|a, b| {
        a.difficulty
            .partial_cmp(&b.difficulty)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let break_points = break_points(items.len(), rate, config.planner.break_interval_minutes);
    let distribution = config
        .planner
        .difficulty_distribution(request.session_type, request.options.difficulty_mode);

    tracing::debug!(
        user_id = %request.user_id,
        session_type = request.session_type.as_str(),
        target = target_questions,
        planned = items.len(),
        review = items.iter().filter(|item| !item.is_new).count(),
        overdue_backlog,
        "session plan assembled"
    );

    Ok(SessionPlan {
        id: Uuid::new_v4().to_string(),
        user_id: request.user_id.clone(),
        session_type: request.session_type,
        items,
        target_questions,
        difficulty_distribution: distribution,
        break_points,
        created_at: now,
        valid_until: now + Duration::hours(config.planner.plan_ttl_hours),
    })
}

/// Questions per minute: the account's observed velocity when known,
/// clamped to sane bounds, otherwise the configured base rate.
fn question_rate(config: &crate::config::PlannerConfig, stats: &AccountStats) -> f64 {
    if stats.study_velocity > 0.0 {
        stats
            .study_velocity
            .clamp(config.min_rate_per_minute, config.max_rate_per_minute)
    } else {
        config.base_rate_per_minute
    }
}

/// Break indices roughly every `break_interval_minutes` of estimated time.
fn break_points(item_count: usize, rate: f64, break_interval_minutes: f64) -> Vec<usize> {
    let step = (break_interval_minutes * rate).round() as usize;
    if step == 0 {
        return Vec::new();
    }
    (step..item_count).step_by(step).collect()
}

fn topic_matches(record: &MasteryRecord, topics: &[String]) -> bool {
    if topics.is_empty() {
        return true;
    }
    record
        .context
        .as_ref()
        .and_then(|context| context.topic.as_ref())
        .is_some_and(|topic| topics.contains(topic))
}
