//! Due-item selection.
//!
//! Classifies each record into a review-urgency window and serves the
//! prioritized list behind `getDueItems` and the session planner's review
//! pool. Ordering is a stable two-key sort: overdue records first, then next
//! review date ascending within each group.

use chrono::{DateTime, Duration, Utc};

use crate::error::EngineError;
use crate::store::MasteryStore;
use crate::types::{DueClass, DueFilter, MasteryRecord};

/// Window a next-review date falls into relative to `now`.
///
/// Overdue means more than 24 hours past; due-today is anything else on the
/// current calendar day; upcoming covers the next seven days. A date in the
/// narrow gap between 24 hours ago and the start of today classifies as none
/// of the three.
pub fn classify_due(next_review: DateTime<Utc>, now: DateTime<Utc>) -> Option<DueClass> {
    if next_review < now - Duration::hours(24) {
        return Some(DueClass::Overdue);
    }
    if next_review.date_naive() == now.date_naive() {
        return Some(DueClass::DueToday);
    }
    if next_review > now && next_review <= now + Duration::days(7) {
        return Some(DueClass::Upcoming);
    }
    None
}

/// Whether a record's review date has arrived or passed.
pub fn is_due(record: &MasteryRecord, now: DateTime<Utc>) -> bool {
    record.next_review_date <= now
}

/// Stable two-key ordering: overdue first, then next review date ascending.
pub fn sort_by_urgency(records: &mut [MasteryRecord], now: DateTime<Utc>) {
    records.sort_by_key(|record| {
        let overdue = classify_due(record.next_review_date, now) == Some(DueClass::Overdue);
        (!overdue, record.next_review_date)
    });
}

/// Fetch a user's records matching `filter`, ordered by urgency.
pub async fn due_items(
    store: &dyn MasteryStore,
    user_id: &str,
    limit: usize,
    filter: DueFilter,
    now: DateTime<Utc>,
) -> Result<Vec<MasteryRecord>, EngineError> {
    let records = store.query(user_id).await?;

    let mut selected: Vec<MasteryRecord> = records
        .into_iter()
        .filter(|record| match filter {
            DueFilter::All => true,
            DueFilter::Overdue => {
                classify_due(record.next_review_date, now) == Some(DueClass::Overdue)
            }
            DueFilter::DueToday => {
                classify_due(record.next_review_date, now) == Some(DueClass::DueToday)
            }
            DueFilter::Upcoming => {
                classify_due(record.next_review_date, now) == Some(DueClass::Upcoming)
            }
        })
        .collect();

    sort_by_urgency(&mut selected, now);
    selected.truncate(limit);
    Ok(selected)
}
