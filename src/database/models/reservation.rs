use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::types::ReservationStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i32,
    pub status: ReservationStatus,
}

/// Validated reservation fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub people: i32,
}

impl NewReservation {
    /// Materialize as a stored row. New rows always start `booked`.
    pub fn into_reservation(self, reservation_id: i32) -> Reservation {
        Reservation {
            reservation_id,
            first_name: self.first_name,
            last_name: self.last_name,
            mobile_number: self.mobile_number,
            reservation_date: self.reservation_date,
            reservation_time: self.reservation_time,
            people: self.people,
            status: ReservationStatus::Booked,
        }
    }
}

impl Reservation {
    /// Overwrite the editable fields, keeping id and status.
    pub fn apply(&mut self, changes: &NewReservation) {
        self.first_name = changes.first_name.clone();
        self.last_name = changes.last_name.clone();
        self.mobile_number = changes.mobile_number.clone();
        self.reservation_date = changes.reservation_date;
        self.reservation_time = changes.reservation_time;
        self.people = changes.people;
    }

    /// Why this reservation cannot take a table, if anything. Only `booked` rows can be seated.
    pub fn seating_blocker(&self) -> Option<String> {
        match self.status {
            ReservationStatus::Booked => None,
            ReservationStatus::Seated => Some(format!("{} already seated", self.reservation_id)),
            status => Some(format!("{} is {} and cannot be seated", self.reservation_id, status)),
        }
    }
}

// status is stored as TEXT
impl<'r> FromRow<'r, PgRow> for Reservation {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status.parse::<ReservationStatus>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            reservation_id: row.try_get("reservation_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            mobile_number: row.try_get("mobile_number")?,
            reservation_date: row.try_get("reservation_date")?,
            reservation_time: row.try_get("reservation_time")?,
            people: row.try_get("people")?,
            status,
        })
    }
}

/// How a reservation listing is narrowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationSearch {
    All,
    Date(NaiveDate),
    /// Digits only; matched as a substring of the stored number's digits
    Mobile(String),
}

/// Strip everything but ASCII digits, so "(555) 123-4567" becomes "5551234567".
pub fn mobile_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}
