use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::currency::{convert, Currency};
use crate::domain::subscription::{BillingCycle, Category, Subscription};
use crate::errors::TrackerError;
use crate::schedule::cycle::{add_months, days_in_month, next_payment_date, MonthRollover};
use crate::storage::{read_json_or, write_json, KeyValueStore, SUBSCRIPTIONS_KEY};

/// Dashboard and list sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NextPaymentDate,
    Name,
    Amount,
    Category,
}

impl FromStr for SortOrder {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "next" | "next-payment" | "nextpaymentdate" => Ok(SortOrder::NextPaymentDate),
            "name" => Ok(SortOrder::Name),
            "amount" => Ok(SortOrder::Amount),
            "category" => Ok(SortOrder::Category),
            other => Err(TrackerError::Validation(format!(
                "unrecognized sort order `{other}`"
            ))),
        }
    }
}

pub struct SubscriptionService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SubscriptionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the persisted collection. A missing or malformed blob falls
    /// back to the sample dataset (the first-run experience), which is then
    /// persisted so subsequent loads are stable.
    pub fn list(&self, today: NaiveDate) -> Vec<Subscription> {
        let mut seeded = false;
        let subscriptions = read_json_or(&self.store, SUBSCRIPTIONS_KEY, || {
            seeded = true;
            sample_subscriptions(today)
        });
        if seeded {
            write_json(&self.store, SUBSCRIPTIONS_KEY, &subscriptions);
        }
        subscriptions
    }

    pub fn sorted(&self, order: SortOrder, today: NaiveDate) -> Vec<Subscription> {
        let mut subscriptions = self.list(today);
        match order {
            SortOrder::NextPaymentDate => subscriptions.sort_by_key(|sub| {
                next_payment_date(sub.first_payment_date, sub.billing_cycle, today)
            }),
            SortOrder::Name => subscriptions
                .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            // Highest spend first, compared in USD.
            SortOrder::Amount => subscriptions.sort_by(|a, b| {
                let a_usd = convert(a.amount, a.currency, Currency::Usd);
                let b_usd = convert(b.amount, b.currency, Currency::Usd);
                b_usd.partial_cmp(&a_usd).unwrap_or(Ordering::Equal)
            }),
            SortOrder::Category => subscriptions.sort_by(|a, b| {
                a.category
                    .cmp(&b.category)
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }),
        }
        subscriptions
    }

    pub fn add(
        &self,
        subscription: Subscription,
        today: NaiveDate,
    ) -> Result<Subscription, TrackerError> {
        subscription.validate()?;
        let mut subscriptions = self.list(today);
        subscriptions.push(subscription.clone());
        write_json(&self.store, SUBSCRIPTIONS_KEY, &subscriptions);
        Ok(subscription)
    }

    pub fn update(&self, subscription: Subscription, today: NaiveDate) -> Result<(), TrackerError> {
        subscription.validate()?;
        let mut subscriptions = self.list(today);
        let slot = subscriptions
            .iter_mut()
            .find(|sub| sub.id == subscription.id)
            .ok_or(TrackerError::SubscriptionNotFound(subscription.id))?;
        *slot = subscription;
        write_json(&self.store, SUBSCRIPTIONS_KEY, &subscriptions);
        Ok(())
    }

    pub fn remove(&self, id: Uuid, today: NaiveDate) -> Result<(), TrackerError> {
        let mut subscriptions = self.list(today);
        let before = subscriptions.len();
        subscriptions.retain(|sub| sub.id != id);
        if subscriptions.len() == before {
            return Err(TrackerError::SubscriptionNotFound(id));
        }
        write_json(&self.store, SUBSCRIPTIONS_KEY, &subscriptions);
        Ok(())
    }

    /// Records a confirmed payment by resetting the cycle anchor to `today`,
    /// so the next charge is computed one cycle from the payment date. Paying
    /// early or late therefore shifts the schedule permanently; the policy
    /// is deliberate and lives only here, so a cadence-preserving variant
    /// could be swapped in behind the same signature. Calling this twice for
    /// one logical payment is safe but shifts the schedule again.
    pub fn mark_as_paid(&self, id: Uuid, today: NaiveDate) -> Result<Subscription, TrackerError> {
        let mut subscriptions = self.list(today);
        let sub = subscriptions
            .iter_mut()
            .find(|sub| sub.id == id)
            .ok_or(TrackerError::SubscriptionNotFound(id))?;
        sub.first_payment_date = today;
        let updated = sub.clone();
        write_json(&self.store, SUBSCRIPTIONS_KEY, &subscriptions);
        Ok(updated)
    }

    /// Resolves a subscription by id, or by case-insensitive name when the
    /// query is not a valid id.
    pub fn find(&self, query: &str, today: NaiveDate) -> Option<Subscription> {
        let subscriptions = self.list(today);
        if let Ok(id) = Uuid::parse_str(query) {
            return subscriptions.into_iter().find(|sub| sub.id == id);
        }
        let query = query.to_lowercase();
        subscriptions
            .into_iter()
            .find(|sub| sub.name.to_lowercase() == query)
    }
}

/// The first-run dataset, with anchors placed relative to `today`.
pub fn sample_subscriptions(today: NaiveDate) -> Vec<Subscription> {
    vec![
        Subscription::new(
            "Netflix",
            15.49,
            Currency::Usd,
            BillingCycle::Monthly,
            past_date(today, 2, 5),
            Category::Entertainment,
        )
        .with_notes("Standard HD plan"),
        Subscription::new(
            "Spotify",
            9.99,
            Currency::Eur,
            BillingCycle::Monthly,
            past_date(today, 1, 15),
            Category::Entertainment,
        ),
        Subscription::new(
            "Adobe Creative Cloud",
            59.99,
            Currency::Usd,
            BillingCycle::Monthly,
            past_date(today, 0, 20),
            Category::Work,
        )
        .with_notes("All Apps subscription"),
        Subscription::new(
            "Notion",
            96.0,
            Currency::Usd,
            BillingCycle::Annually,
            past_date(today, 8, 1),
            Category::Work,
        ),
        Subscription::new(
            "Gym Membership",
            450_000.0,
            Currency::Uzs,
            BillingCycle::Quarterly,
            past_date(today, 1, 28),
            Category::Health,
        ),
    ]
}

fn past_date(today: NaiveDate, months_ago: u32, day: u32) -> NaiveDate {
    let shifted = add_months(today, -(months_ago as i32), MonthRollover::default());
    let day = day.min(days_in_month(shifted.year(), shifted.month()));
    NaiveDate::from_ymd_opt(shifted.year(), shifted.month(), day).unwrap()
}
