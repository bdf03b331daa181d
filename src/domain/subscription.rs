//! Domain types for recurring subscription records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Currency;
use crate::domain::common::{Displayable, Identifiable, NamedEntity};
use crate::errors::TrackerError;

/// How often a subscription charges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl BillingCycle {
    pub const ALL: [BillingCycle; 5] = [
        BillingCycle::Weekly,
        BillingCycle::Monthly,
        BillingCycle::Quarterly,
        BillingCycle::SemiAnnually,
        BillingCycle::Annually,
    ];

    /// Calendar months per cycle step, `None` for the day-based weekly cycle.
    pub fn months_per_step(&self) -> Option<u32> {
        match self {
            BillingCycle::Weekly => None,
            BillingCycle::Monthly => Some(1),
            BillingCycle::Quarterly => Some(3),
            BillingCycle::SemiAnnually => Some(6),
            BillingCycle::Annually => Some(12),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BillingCycle::Weekly => "Weekly",
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::SemiAnnually => "Semi-annually",
            BillingCycle::Annually => "Annually",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BillingCycle {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(BillingCycle::Weekly),
            "monthly" => Ok(BillingCycle::Monthly),
            "quarterly" => Ok(BillingCycle::Quarterly),
            "semiannually" | "semi-annually" => Ok(BillingCycle::SemiAnnually),
            "annually" | "yearly" => Ok(BillingCycle::Annually),
            other => Err(TrackerError::Validation(format!(
                "unrecognized billing cycle `{other}`"
            ))),
        }
    }
}

/// Spending category attached to every subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Entertainment,
    Work,
    Education,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Entertainment,
        Category::Work,
        Category::Education,
        Category::Health,
        Category::Other,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Entertainment => "Entertainment",
            Category::Work => "Work",
            Category::Education => "Education",
            Category::Health => "Health",
            Category::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "entertainment" => Ok(Category::Entertainment),
            "work" => Ok(Category::Work),
            "education" => Ok(Category::Education),
            "health" => Ok(Category::Health),
            "other" => Ok(Category::Other),
            other => Err(TrackerError::Validation(format!(
                "unrecognized category `{other}`"
            ))),
        }
    }
}

/// A recurring subscription. `first_payment_date` anchors the billing cycle:
/// every charge falls on the anchor plus a whole number of cycle steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub currency: Currency,
    pub billing_cycle: BillingCycle,
    pub first_payment_date: NaiveDate,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        currency: Currency,
        billing_cycle: BillingCycle,
        first_payment_date: NaiveDate,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            currency,
            billing_cycle,
            first_payment_date,
            category,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the record invariants enforced at the mutation boundary.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.name.trim().is_empty() {
            return Err(TrackerError::Validation("name must not be empty".into()));
        }
        if !(self.amount > 0.0) {
            return Err(TrackerError::Validation(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

impl Identifiable for Subscription {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Subscription {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Subscription {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.name, self.billing_cycle, self.category)
    }
}
