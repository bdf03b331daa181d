//! Payment status classification.
//!
//! The acknowledged set is session-only: it starts empty, grows as payments
//! are confirmed, and is never persisted; restarting the application brings
//! overdue prompts back. Callers own its lifecycle.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use super::cycle::{days_until, next_payment_date};
use crate::domain::subscription::Subscription;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Overdue,
    DueToday,
    Upcoming,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Overdue => "Overdue",
            PaymentStatus::DueToday => "Due today",
            PaymentStatus::Upcoming => "Upcoming",
        }
    }
}

/// Maps a day offset (see `days_until`) to a status. An acknowledged payment
/// is never reported overdue again within the session.
pub fn classify_offset(offset: i64, acknowledged: bool) -> PaymentStatus {
    if offset < 0 && !acknowledged {
        PaymentStatus::Overdue
    } else if offset == 0 {
        PaymentStatus::DueToday
    } else {
        PaymentStatus::Upcoming
    }
}

/// Classifies a subscription against `today`.
///
/// A next payment date computed fresh from `today` is always strictly in the
/// future, so this returns `Upcoming` for a live snapshot; the `Overdue` and
/// `DueToday` branches apply when a caller classifies an offset derived from
/// a date computed earlier in the session (`classify_offset`), e.g. a
/// rendered view that crossed midnight.
pub fn classify(sub: &Subscription, today: NaiveDate, paid: &HashSet<Uuid>) -> PaymentStatus {
    let next = next_payment_date(sub.first_payment_date, sub.billing_cycle, today);
    classify_offset(days_until(next, today), paid.contains(&sub.id))
}
