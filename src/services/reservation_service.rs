use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::domain::reservation::{Reservation, ReservationStatus, ReservationType};
use crate::errors::TrackerError;
use crate::storage::{read_json_or, write_json, KeyValueStore, RESERVATIONS_KEY};

pub struct ReservationService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ReservationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the persisted collection sorted by date, seeding the sample
    /// dataset on first run or a malformed blob.
    pub fn list(&self, today: NaiveDate) -> Vec<Reservation> {
        let mut seeded = false;
        let mut reservations = read_json_or(&self.store, RESERVATIONS_KEY, || {
            seeded = true;
            sample_reservations(today)
        });
        if seeded {
            write_json(&self.store, RESERVATIONS_KEY, &reservations);
        }
        reservations.sort_by_key(|res| res.date);
        reservations
    }

    pub fn add(
        &self,
        reservation: Reservation,
        today: NaiveDate,
    ) -> Result<Reservation, TrackerError> {
        reservation.validate()?;
        let mut reservations = self.list(today);
        reservations.push(reservation.clone());
        write_json(&self.store, RESERVATIONS_KEY, &reservations);
        Ok(reservation)
    }

    pub fn update(&self, reservation: Reservation, today: NaiveDate) -> Result<(), TrackerError> {
        reservation.validate()?;
        let mut reservations = self.list(today);
        let slot = reservations
            .iter_mut()
            .find(|res| res.id == reservation.id)
            .ok_or(TrackerError::ReservationNotFound(reservation.id))?;
        *slot = reservation;
        write_json(&self.store, RESERVATIONS_KEY, &reservations);
        Ok(())
    }

    pub fn remove(&self, id: Uuid, today: NaiveDate) -> Result<(), TrackerError> {
        let mut reservations = self.list(today);
        let before = reservations.len();
        reservations.retain(|res| res.id != id);
        if reservations.len() == before {
            return Err(TrackerError::ReservationNotFound(id));
        }
        write_json(&self.store, RESERVATIONS_KEY, &reservations);
        Ok(())
    }

    /// Resolves a reservation by id, or by case-insensitive name.
    pub fn find(&self, query: &str, today: NaiveDate) -> Option<Reservation> {
        let reservations = self.list(today);
        if let Ok(id) = Uuid::parse_str(query) {
            return reservations.into_iter().find(|res| res.id == id);
        }
        let query = query.to_lowercase();
        reservations
            .into_iter()
            .find(|res| res.name.to_lowercase() == query)
    }
}

/// The first-run dataset, with dates placed relative to `today`.
pub fn sample_reservations(today: NaiveDate) -> Vec<Reservation> {
    vec![
        Reservation::new(
            ReservationType::Hotel,
            "Grand Hyatt Tashkent",
            "Tashkent, Uzbekistan",
            upcoming(today, 10, 14),
            ReservationStatus::Confirmed,
        )
        .with_details("King Bed, Non-smoking, Room 1204")
        .with_booking_url("https://www.hyatt.com/en-US/hotel/uzbekistan/hyatt-regency-tashkent"),
        Reservation::new(
            ReservationType::Restaurant,
            "Caravan",
            "Tashkent, Uzbekistan",
            upcoming(today, 2, 19),
            ReservationStatus::Confirmed,
        )
        .with_details("Table for 4 people, outdoor seating")
        .with_booking_url("https://caravan-group.uz/restaurant/caravan/"),
        Reservation::new(
            ReservationType::Cinema,
            "Dune: Part Three",
            "Magic Cinema, Blockbuster Mall",
            upcoming(today, 5, 21),
            ReservationStatus::Confirmed,
        )
        .with_details("Row G, Seats 11-12, IMAX")
        .with_booking_url("https://magiccinema.uz/"),
        Reservation::new(
            ReservationType::Tour,
            "Samarkand Day Trip",
            "Departure from Tashkent",
            upcoming(today, 25, 8),
            ReservationStatus::Pending,
        )
        .with_details("Waiting for guide confirmation"),
    ]
}

fn upcoming(today: NaiveDate, days_from_now: i64, hour: u32) -> NaiveDateTime {
    (today + Duration::days(days_from_now))
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}
