mod common;

use common::{fixed_today, ymd};
use subtrack_core::currency::{convert, Currency};
use subtrack_core::domain::subscription::{BillingCycle, Category, Subscription};
use subtrack_core::reports::{
    category_breakdown, monthly_equivalent_usd, spending_summary, trailing_monthly_trend,
    WEEKS_PER_MONTH,
};

fn sub(
    name: &str,
    amount: f64,
    currency: Currency,
    cycle: BillingCycle,
    anchor: chrono::NaiveDate,
    category: Category,
) -> Subscription {
    Subscription::new(name, amount, currency, cycle, anchor, category)
}

#[test]
fn monthly_equivalents_follow_the_cycle_factors() {
    let anchor = ymd(2026, 6, 1);
    let weekly = sub("A", 10.0, Currency::Usd, BillingCycle::Weekly, anchor, Category::Other);
    let monthly = sub("B", 10.0, Currency::Usd, BillingCycle::Monthly, anchor, Category::Other);
    let quarterly = sub("C", 30.0, Currency::Usd, BillingCycle::Quarterly, anchor, Category::Other);
    let semi = sub("D", 60.0, Currency::Usd, BillingCycle::SemiAnnually, anchor, Category::Other);
    let annual = sub("E", 120.0, Currency::Usd, BillingCycle::Annually, anchor, Category::Other);

    assert!((monthly_equivalent_usd(&weekly) - 10.0 * WEEKS_PER_MONTH).abs() < 1e-9);
    assert!((monthly_equivalent_usd(&monthly) - 10.0).abs() < 1e-9);
    assert!((monthly_equivalent_usd(&quarterly) - 10.0).abs() < 1e-9);
    assert!((monthly_equivalent_usd(&semi) - 10.0).abs() < 1e-9);
    assert!((monthly_equivalent_usd(&annual) - 10.0).abs() < 1e-9);
}

#[test]
fn monthly_equivalent_is_linear_in_amount() {
    let anchor = ymd(2026, 3, 10);
    for cycle in BillingCycle::ALL {
        for currency in Currency::ALL {
            let single = sub("S", 7.3, currency, cycle, anchor, Category::Work);
            let mut double = single.clone();
            double.amount *= 2.0;
            assert!(
                (monthly_equivalent_usd(&double) - 2.0 * monthly_equivalent_usd(&single)).abs()
                    < 1e-9,
                "not linear for {cycle} in {currency}"
            );
        }
    }
}

#[test]
fn breakdown_groups_by_category_and_settles_in_usd() {
    let anchor = ymd(2026, 5, 1);
    let subs = vec![
        sub("Netflix", 12.0, Currency::Usd, BillingCycle::Monthly, anchor, Category::Entertainment),
        sub("Spotify", 10.0, Currency::Eur, BillingCycle::Monthly, anchor, Category::Entertainment),
        sub("Notion", 96.0, Currency::Usd, BillingCycle::Annually, anchor, Category::Work),
    ];
    let breakdown = category_breakdown(&subs, Currency::Usd);

    let entertainment = breakdown.by_category[&Category::Entertainment];
    assert!((entertainment - (12.0 + 10.0 * 1.08)).abs() < 1e-9);
    let work = breakdown.by_category[&Category::Work];
    assert!((work - 8.0).abs() < 1e-9);
    assert!((breakdown.total - (entertainment + work)).abs() < 1e-9);
    assert!(breakdown.by_category.get(&Category::Health).is_none());
}

#[test]
fn breakdown_total_is_invariant_across_display_currencies() {
    let anchor = ymd(2026, 5, 1);
    let subs = vec![
        sub("A", 12.0, Currency::Usd, BillingCycle::Monthly, anchor, Category::Entertainment),
        sub("B", 9.99, Currency::Eur, BillingCycle::Weekly, anchor, Category::Health),
        sub("C", 450_000.0, Currency::Uzs, BillingCycle::Quarterly, anchor, Category::Health),
    ];
    let usd_total = category_breakdown(&subs, Currency::Usd).total;
    for display in Currency::ALL {
        let total = category_breakdown(&subs, display).total;
        let back = convert(total, display, Currency::Usd);
        assert!(
            (back - usd_total).abs() < 1e-6,
            "total in {display} converts back to {back}, expected {usd_total}"
        );
    }
}

#[test]
fn empty_collection_aggregates_to_zero() {
    let today = fixed_today();
    for display in Currency::ALL {
        let breakdown = category_breakdown(&[], display);
        assert!(breakdown.by_category.is_empty());
        assert_eq!(breakdown.total, 0.0);

        let summary = spending_summary(&[], 300.0, display);
        assert_eq!(summary.total_monthly, 0.0);
        assert_eq!(summary.percent_of_budget, 0.0);

        let trend = trailing_monthly_trend(&[], 6, today, display);
        assert_eq!(trend.len(), 6);
        assert!(trend.iter().all(|point| point.amount == 0.0));
    }
}

#[test]
fn trend_is_oldest_first_and_labels_the_months() {
    let today = fixed_today(); // 2026-08-06
    let trend = trailing_monthly_trend(&[], 6, today, Currency::Usd);
    let labels: Vec<&str> = trend.iter().map(|point| point.label.as_str()).collect();
    assert_eq!(labels, ["Mar", "Apr", "May", "Jun", "Jul", "Aug"]);
    assert_eq!(trend[0].year, 2026);
    assert_eq!(trend[0].month, 3);
    assert_eq!(trend[5].month, 8);
}

#[test]
fn trend_crosses_year_boundaries() {
    let today = ymd(2026, 2, 10);
    let trend = trailing_monthly_trend(&[], 4, today, Currency::Usd);
    let labels: Vec<&str> = trend.iter().map(|point| point.label.as_str()).collect();
    assert_eq!(labels, ["Nov", "Dec", "Jan", "Feb"]);
    assert_eq!(trend[0].year, 2025);
    assert_eq!(trend[2].year, 2026);
}

#[test]
fn trend_counts_each_charge_that_actually_happened() {
    let today = fixed_today(); // 2026-08-06
    let subs = vec![
        // Monthly on the 5th since June: charges in Jun, Jul, Aug (the 5th
        // precedes the fixed today).
        sub("Netflix", 10.0, Currency::Usd, BillingCycle::Monthly, ymd(2026, 6, 5), Category::Entertainment),
        // Weekly from July 1: 5 charges inside July, one by Aug 6.
        sub("Pass", 5.0, Currency::Usd, BillingCycle::Weekly, ymd(2026, 7, 1), Category::Health),
    ];
    let trend = trailing_monthly_trend(&subs, 3, today, Currency::Usd);
    assert_eq!(trend.len(), 3);

    // June: one Netflix charge.
    assert!((trend[0].amount - 10.0).abs() < 1e-9);
    // July: Netflix + weekly on 1, 8, 15, 22, 29.
    assert!((trend[1].amount - (10.0 + 5.0 * 5.0)).abs() < 1e-9);
    // August so far: Netflix on the 5th + weekly on the 5th; the charge on
    // Aug 12 is in the future and must not appear.
    assert!((trend[2].amount - (10.0 + 5.0)).abs() < 1e-9);
}

#[test]
fn trend_weekly_contribution_is_never_zero_in_a_covered_month() {
    let today = fixed_today();
    for day in 1..=7 {
        let subs = vec![sub(
            "W",
            1.0,
            Currency::Usd,
            BillingCycle::Weekly,
            ymd(2026, 1, day),
            Category::Other,
        )];
        let trend = trailing_monthly_trend(&subs, 3, today, Currency::Usd);
        // Jun and Jul lie fully between the anchor and today.
        for point in trend.iter().take(2) {
            let charges = point.amount.round() as u32;
            assert!(
                (4..=5).contains(&charges),
                "weekly anchor day {day} gave {charges} charges in {}",
                point.label
            );
        }
    }
}

#[test]
fn summary_measures_against_the_budget_and_caps_at_100() {
    let anchor = ymd(2026, 7, 1);
    let subs = vec![sub("A", 150.0, Currency::Usd, BillingCycle::Monthly, anchor, Category::Work)];
    let summary = spending_summary(&subs, 300.0, Currency::Usd);
    assert!((summary.total_monthly - 150.0).abs() < 1e-9);
    assert!((summary.budget - 300.0).abs() < 1e-9);
    assert!((summary.percent_of_budget - 50.0).abs() < 1e-9);

    let over = vec![sub("B", 900.0, Currency::Usd, BillingCycle::Monthly, anchor, Category::Work)];
    assert_eq!(spending_summary(&over, 300.0, Currency::Usd).percent_of_budget, 100.0);

    // Zero budget never divides.
    assert_eq!(spending_summary(&subs, 0.0, Currency::Usd).percent_of_budget, 0.0);
}
