//! Dashboard aggregation over a subscription snapshot.
//!
//! Every rollup sums in USD and converts to the display currency only at the
//! end, so rounding differences cannot compound across categories or months.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::currency::{convert, Currency};
use crate::domain::subscription::{BillingCycle, Category, Subscription};
use crate::schedule::cycle::{add_months, occurrences_in_month, MonthRollover};

/// Average weeks per month used to normalize weekly cycles. This is the
/// usual 4.33 approximation, deliberately not the exact 52/12.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Normalizes a subscription to its monthly run-rate in USD.
pub fn monthly_equivalent_usd(sub: &Subscription) -> f64 {
    let base = convert(sub.amount, sub.currency, Currency::Usd);
    match sub.billing_cycle {
        BillingCycle::Weekly => base * WEEKS_PER_MONTH,
        BillingCycle::Monthly => base,
        BillingCycle::Quarterly => base / 3.0,
        BillingCycle::SemiAnnually => base / 6.0,
        BillingCycle::Annually => base / 12.0,
    }
}

/// Monthly-equivalent spend per category, converted for display.
#[derive(Debug, Clone)]
pub struct CategoryBreakdown {
    pub currency: Currency,
    pub by_category: BTreeMap<Category, f64>,
    pub total: f64,
}

/// Sums monthly equivalents per category in USD, then converts each category
/// total and the grand total to `display` at the end. An empty snapshot
/// yields an empty map and a zero total.
pub fn category_breakdown(subscriptions: &[Subscription], display: Currency) -> CategoryBreakdown {
    let mut totals_usd: BTreeMap<Category, f64> = BTreeMap::new();
    for sub in subscriptions {
        *totals_usd.entry(sub.category).or_insert(0.0) += monthly_equivalent_usd(sub);
    }
    let total_usd: f64 = totals_usd.values().sum();
    let by_category = totals_usd
        .into_iter()
        .map(|(category, usd)| (category, convert(usd, Currency::Usd, display)))
        .collect();
    CategoryBreakdown {
        currency: display,
        by_category,
        total: convert(total_usd, Currency::Usd, display),
    }
}

/// One month of the trailing spend trend.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub amount: f64,
}

/// Actual charges over the last `months_back` calendar months (oldest first,
/// current month included). Each subscription contributes every occurrence
/// that falls inside the month and on or before `today`; future charges are
/// never counted, even within the current month. Only weekly cycles can hit
/// a month more than once.
pub fn trailing_monthly_trend(
    subscriptions: &[Subscription],
    months_back: u32,
    today: NaiveDate,
    display: Currency,
) -> Vec<TrendPoint> {
    let current_month_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
    let mut points = Vec::with_capacity(months_back as usize);
    for back in (0..months_back).rev() {
        let month_start = add_months(
            current_month_start,
            -(back as i32),
            MonthRollover::default(),
        );
        let mut total_usd = 0.0;
        for sub in subscriptions {
            let hits = occurrences_in_month(
                sub.first_payment_date,
                sub.billing_cycle,
                month_start.year(),
                month_start.month(),
                today,
            );
            if hits > 0 {
                total_usd += hits as f64 * convert(sub.amount, sub.currency, Currency::Usd);
            }
        }
        points.push(TrendPoint {
            year: month_start.year(),
            month: month_start.month(),
            label: month_label(month_start.month()).to_string(),
            amount: convert(total_usd, Currency::Usd, display),
        });
    }
    points
}

/// Total monthly run-rate measured against the monthly budget.
#[derive(Debug, Clone)]
pub struct SpendingSummary {
    pub currency: Currency,
    pub total_monthly: f64,
    pub budget: f64,
    pub percent_of_budget: f64,
}

/// Compares the snapshot's monthly equivalent against `budget_usd`. The
/// percentage is computed in USD and capped at 100.
pub fn spending_summary(
    subscriptions: &[Subscription],
    budget_usd: f64,
    display: Currency,
) -> SpendingSummary {
    let total_usd: f64 = subscriptions.iter().map(monthly_equivalent_usd).sum();
    let percent_of_budget = if budget_usd > 0.0 {
        ((total_usd / budget_usd) * 100.0).min(100.0)
    } else {
        0.0
    };
    SpendingSummary {
        currency: display,
        total_monthly: convert(total_usd, Currency::Usd, display),
        budget: convert(budget_usd, Currency::Usd, display),
        percent_of_budget,
    }
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
