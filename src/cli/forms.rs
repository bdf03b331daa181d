//! Interactive dialoguer forms for records the user did not fully specify
//! with flags.

use chrono::{NaiveDate, NaiveDateTime};
use dialoguer::{Input, Password, Select};

use crate::domain::reservation::{Reservation, ReservationStatus, ReservationType};
use crate::domain::subscription::{BillingCycle, Category, Subscription};
use crate::currency::Currency;
use crate::errors::TrackerError;

pub fn subscription_form(existing: Option<&Subscription>) -> Result<Subscription, TrackerError> {
    let name: String = {
        let mut input = Input::new().with_prompt("Service name");
        if let Some(sub) = existing {
            input = input.default(sub.name.clone());
        }
        input.interact_text()?
    };

    let amount: f64 = {
        let mut input = Input::new().with_prompt("Amount per charge");
        if let Some(sub) = existing {
            input = input.default(sub.amount);
        }
        input.interact_text()?
    };

    let currency = select_from(
        "Currency",
        &Currency::ALL,
        existing.map(|sub| sub.currency),
    )?;
    let cycle = select_from(
        "Billing cycle",
        &BillingCycle::ALL,
        existing.map(|sub| sub.billing_cycle),
    )?;
    let category = select_from(
        "Category",
        &Category::ALL,
        existing.map(|sub| sub.category),
    )?;

    let date_text: String = {
        let mut input = Input::new()
            .with_prompt("First payment date (YYYY-MM-DD)")
            .validate_with(|text: &String| -> Result<(), String> {
                text.parse::<NaiveDate>().map(|_| ()).map_err(|err| err.to_string())
            });
        if let Some(sub) = existing {
            input = input.default(sub.first_payment_date.to_string());
        }
        input.interact_text()?
    };
    let first_payment_date = date_text
        .parse::<NaiveDate>()
        .map_err(|err| TrackerError::Validation(err.to_string()))?;

    let notes: String = {
        let mut input = Input::new().with_prompt("Notes (blank for none)").allow_empty(true);
        if let Some(sub) = existing {
            input = input.default(sub.notes.clone().unwrap_or_default());
        }
        input.interact_text()?
    };

    let mut subscription =
        Subscription::new(name, amount, currency, cycle, first_payment_date, category);
    if let Some(existing) = existing {
        subscription.id = existing.id;
    }
    if !notes.trim().is_empty() {
        subscription.notes = Some(notes.trim().to_string());
    }
    Ok(subscription)
}

pub fn reservation_form(existing: Option<&Reservation>) -> Result<Reservation, TrackerError> {
    let kind = select_from(
        "Reservation type",
        &ReservationType::ALL,
        existing.map(|res| res.kind),
    )?;

    let name: String = {
        let mut input = Input::new().with_prompt("Name");
        if let Some(res) = existing {
            input = input.default(res.name.clone());
        }
        input.interact_text()?
    };

    let location: String = {
        let mut input = Input::new().with_prompt("Location");
        if let Some(res) = existing {
            input = input.default(res.location.clone());
        }
        input.interact_text()?
    };

    let date_text: String = {
        let mut input = Input::new()
            .with_prompt("Date and time (YYYY-MM-DD HH:MM)")
            .validate_with(|text: &String| -> Result<(), String> {
                parse_datetime(text).map(|_| ()).map_err(|err| err.to_string())
            });
        if let Some(res) = existing {
            input = input.default(res.date.format("%Y-%m-%d %H:%M").to_string());
        }
        input.interact_text()?
    };
    let date = parse_datetime(&date_text)?;

    let status = select_from(
        "Status",
        &[
            ReservationStatus::Confirmed,
            ReservationStatus::Pending,
            ReservationStatus::Cancelled,
        ],
        existing.map(|res| res.status),
    )?;

    let details: String = {
        let mut input = Input::new()
            .with_prompt("Details (blank for none)")
            .allow_empty(true);
        if let Some(res) = existing {
            input = input.default(res.details.clone().unwrap_or_default());
        }
        input.interact_text()?
    };

    let mut reservation = Reservation::new(kind, name, location, date, status);
    if let Some(existing) = existing {
        reservation.id = existing.id;
        reservation.booking_url = existing.booking_url.clone();
    }
    if !details.trim().is_empty() {
        reservation.details = Some(details.trim().to_string());
    }
    Ok(reservation)
}

pub fn signup_form() -> Result<(String, String, String), TrackerError> {
    let name: String = Input::new().with_prompt("Name").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    Ok((name, email, password))
}

pub fn login_form() -> Result<(String, String), TrackerError> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    Ok((email, password))
}

/// Accepts `YYYY-MM-DD HH:MM`, the ISO `T` separator, or a bare date
/// (defaulting to noon).
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, TrackerError> {
    let raw = raw.trim();
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Ok(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(parsed);
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(date.and_hms_opt(12, 0, 0).unwrap());
    }
    Err(TrackerError::Validation(format!(
        "unrecognized date `{raw}`, expected YYYY-MM-DD HH:MM"
    )))
}

fn select_from<T: Copy + PartialEq + ToString>(
    prompt: &str,
    options: &[T],
    current: Option<T>,
) -> Result<T, TrackerError> {
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let default = current
        .and_then(|value| options.iter().position(|option| *option == value))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(options[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_datetime_accepts_common_shapes() {
        assert!(parse_datetime("2026-08-16 19:00").is_ok());
        assert!(parse_datetime("2026-08-16T19:00").is_ok());
        let noon = parse_datetime("2026-08-16").unwrap();
        assert_eq!(noon.format("%H:%M").to_string(), "12:00");
        assert!(parse_datetime("next friday").is_err());
    }
}
