use chrono::{DateTime, Utc};
use orderdesk_shared::{Order, ProcessStatus};
use serde::Serialize;

/// Highlight for an estimated conclusion date that is close or past
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConclusionAlert {
    Late,
    DueSoon,
}

/// Alerts only apply before delivery. Days are whole days, truncated toward zero.
pub fn conclusion_alert(order: &Order, now: DateTime<Utc>, warning_days: i64) -> Option<ConclusionAlert> {
    if order.process_status >= ProcessStatus::DeliveredOrReturned {
        return None;
    }

    let days_left = (order.est_conclusion_date? - now).num_days();
    if days_left <= 0 {
        Some(ConclusionAlert::Late)
    } else if days_left <= warning_days {
        Some(ConclusionAlert::DueSoon)
    } else {
        None
    }
}
