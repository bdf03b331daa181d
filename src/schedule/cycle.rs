//! Occurrence arithmetic for billing cycles.
//!
//! All dates are calendar dates (`NaiveDate`), so comparisons can never be
//! skewed by time-of-day or DST. Occurrence `k` of a subscription is always
//! computed from the anchor (`anchor + k` cycle steps), never by iterating a
//! previously clamped intermediate date, so an anchor on the 31st keeps
//! landing on the 31st in every month that has one.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::subscription::BillingCycle;

/// What to do when month arithmetic lands on a day the target month lacks
/// (Jan 31 + 1 month). Calendar libraries disagree here, so the convention is
/// an explicit choice rather than whatever the primitive happens to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthRollover {
    /// Jan 31 + 1 month = Feb 28 (Feb 29 in a leap year).
    #[default]
    ClampToMonthEnd,
    /// Jan 31 + 1 month = Mar 3 (Mar 2 in a leap year), matching what
    /// JavaScript's `Date.setMonth` does.
    OverflowIntoNextMonth,
}

/// Number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    (first_of_next - Duration::days(1)).day()
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month() as i32 - 1
}

/// Shifts a date by a (possibly negative) number of calendar months,
/// resolving missing days via the chosen rollover convention.
pub fn add_months(date: NaiveDate, months: i32, rollover: MonthRollover) -> NaiveDate {
    let total = month_index(date) + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day();
    let last = days_in_month(year, month);
    if day <= last {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    } else {
        match rollover {
            MonthRollover::ClampToMonthEnd => NaiveDate::from_ymd_opt(year, month, last).unwrap(),
            MonthRollover::OverflowIntoNextMonth => {
                NaiveDate::from_ymd_opt(year, month, last).unwrap()
                    + Duration::days((day - last) as i64)
            }
        }
    }
}

/// The date of occurrence `step` (0-based) counted from the anchor.
pub fn cycle_occurrence(
    anchor: NaiveDate,
    cycle: BillingCycle,
    step: u32,
    rollover: MonthRollover,
) -> NaiveDate {
    match cycle.months_per_step() {
        None => anchor + Duration::weeks(step as i64),
        Some(months) => add_months(anchor, months as i32 * step as i32, rollover),
    }
}

/// Smallest `k` with occurrence `k` on or after `date`. Computed
/// analytically from day/month index arithmetic, so a weekly anchor years in
/// the past costs the same as one from last week.
pub fn first_step_on_or_after(
    anchor: NaiveDate,
    cycle: BillingCycle,
    date: NaiveDate,
    rollover: MonthRollover,
) -> u32 {
    if date <= anchor {
        return 0;
    }
    match cycle.months_per_step() {
        None => {
            let days = (date - anchor).num_days();
            ((days + 6) / 7) as u32
        }
        Some(months) => {
            let months = months as i32;
            let span = month_index(date) - month_index(anchor);
            // The estimate can be off by one either way around clamped or
            // overflowed month ends; the two loops settle it in a step or two.
            let mut step = (span.div_euclid(months) - 1).max(0) as u32;
            while cycle_occurrence(anchor, cycle, step, rollover) < date {
                step += 1;
            }
            while step > 0 && cycle_occurrence(anchor, cycle, step - 1, rollover) >= date {
                step -= 1;
            }
            step
        }
    }
}

/// Earliest occurrence strictly after `today`, reachable from the anchor by a
/// non-negative number of cycle steps. An anchor in the future is returned
/// as-is (step 0).
pub fn next_payment_date_with(
    anchor: NaiveDate,
    cycle: BillingCycle,
    today: NaiveDate,
    rollover: MonthRollover,
) -> NaiveDate {
    let earliest = today + Duration::days(1);
    let step = first_step_on_or_after(anchor, cycle, earliest, rollover);
    cycle_occurrence(anchor, cycle, step, rollover)
}

/// `next_payment_date_with` under the default rollover convention.
pub fn next_payment_date(anchor: NaiveDate, cycle: BillingCycle, today: NaiveDate) -> NaiveDate {
    next_payment_date_with(anchor, cycle, today, MonthRollover::default())
}

/// Date-only difference in days: 0 = due today, negative = overdue.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Counts the occurrences falling inside the given calendar month, never
/// counting a date after `today`. Only the weekly cycle can exceed one.
pub fn occurrences_in_month_with(
    anchor: NaiveDate,
    cycle: BillingCycle,
    year: i32,
    month: u32,
    today: NaiveDate,
    rollover: MonthRollover,
) -> u32 {
    let month_start = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date,
        None => return 0,
    };
    let month_end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).unwrap();
    let mut step = first_step_on_or_after(anchor, cycle, month_start, rollover);
    let mut count = 0;
    loop {
        let occurrence = cycle_occurrence(anchor, cycle, step, rollover);
        if occurrence > month_end || occurrence > today {
            break;
        }
        count += 1;
        step += 1;
    }
    count
}

/// `occurrences_in_month_with` under the default rollover convention.
pub fn occurrences_in_month(
    anchor: NaiveDate,
    cycle: BillingCycle,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> u32 {
    occurrences_in_month_with(anchor, cycle, year, month, today, MonthRollover::default())
}
