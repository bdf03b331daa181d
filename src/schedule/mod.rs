//! The billing-cycle date engine: occurrence arithmetic anchored on a
//! subscription's first payment date, payment status classification, and the
//! clock abstraction that keeps "today" injectable.

pub mod clock;
pub mod cycle;
pub mod status;

pub use clock::{Clock, FixedClock, SystemClock};
pub use cycle::{
    add_months, cycle_occurrence, days_in_month, days_until, first_step_on_or_after,
    next_payment_date, next_payment_date_with, occurrences_in_month, occurrences_in_month_with,
    MonthRollover,
};
pub use status::{classify, classify_offset, PaymentStatus};
