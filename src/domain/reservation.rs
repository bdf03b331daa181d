//! Domain types for one-off reservation records. Reservations share no
//! scheduling logic with subscriptions; they are plain dated entries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};
use crate::errors::TrackerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReservationType {
    Hotel,
    Restaurant,
    Tour,
    Cinema,
}

impl ReservationType {
    pub const ALL: [ReservationType; 4] = [
        ReservationType::Hotel,
        ReservationType::Restaurant,
        ReservationType::Tour,
        ReservationType::Cinema,
    ];
}

impl fmt::Display for ReservationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReservationType::Hotel => "Hotel",
            ReservationType::Restaurant => "Restaurant",
            ReservationType::Tour => "Tour",
            ReservationType::Cinema => "Cinema",
        };
        f.write_str(label)
    }
}

impl FromStr for ReservationType {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hotel" => Ok(ReservationType::Hotel),
            "restaurant" => Ok(ReservationType::Restaurant),
            "tour" => Ok(ReservationType::Tour),
            "cinema" => Ok(ReservationType::Cinema),
            other => Err(TrackerError::Validation(format!(
                "unrecognized reservation type `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

impl FromStr for ReservationStatus {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "pending" => Ok(ReservationStatus::Pending),
            "cancelled" | "canceled" => Ok(ReservationStatus::Cancelled),
            other => Err(TrackerError::Validation(format!(
                "unrecognized reservation status `{other}`"
            ))),
        }
    }
}

/// A booked hotel stay, table, tour, or cinema ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ReservationType,
    pub name: String,
    pub location: String,
    pub date: NaiveDateTime,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(
        default,
        rename = "bookingURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub booking_url: Option<String>,
}

impl Reservation {
    pub fn new(
        kind: ReservationType,
        name: impl Into<String>,
        location: impl Into<String>,
        date: NaiveDateTime,
        status: ReservationStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            location: location.into(),
            date,
            status,
            details: None,
            booking_url: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_booking_url(mut self, url: impl Into<String>) -> Self {
        self.booking_url = Some(url.into());
        self
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.name.trim().is_empty() {
            return Err(TrackerError::Validation("name must not be empty".into()));
        }
        Ok(())
    }
}

impl Identifiable for Reservation {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Reservation {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Reservation {
    fn display_label(&self) -> String {
        format!("{} - {} ({})", self.name, self.location, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn serializes_type_and_booking_url_wire_keys() {
        let reservation = Reservation::new(
            ReservationType::Hotel,
            "Grand Hyatt Tashkent",
            "Tashkent, Uzbekistan",
            NaiveDate::from_ymd_opt(2026, 8, 16)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            ReservationStatus::Confirmed,
        )
        .with_booking_url("https://example.com/booking");

        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["type"], "Hotel");
        assert!(json.get("bookingURL").is_some());
        assert!(json.get("details").is_none());
    }
}
