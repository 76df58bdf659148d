// Ring 1: validates a reservation payload into a NewReservation
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::database::models::NewReservation;
use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::payload::{as_i32, is_truthy};
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation, ReservationStatus};

const REQUIRED_FIELDS: [&str; 6] = [
    "first_name",
    "last_name",
    "mobile_number",
    "reservation_date",
    "reservation_time",
    "people",
];

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

// Seconds are tolerated so a fetched row can be sent back unchanged
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}(:\d{2})?$").expect("valid time regex"));

#[derive(Default)]
pub struct ReservationFieldsValidator;

impl Observer for ReservationFieldsValidator {
    fn name(&self) -> &'static str {
        "ReservationFieldsValidator"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::InputValidation
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Reservation && matches!(op, Operation::Create | Operation::Update)
    }
}

#[async_trait]
impl GenericObserver for ReservationFieldsValidator {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let payload = ctx
            .payload
            .as_ref()
            .ok_or_else(|| ObserverError::validation("No data sent"))?;

        let reservation = parse_reservation(payload)?;
        ctx.set_metadata(reservation);
        Ok(())
    }
}

pub fn parse_reservation(payload: &Value) -> Result<NewReservation, ObserverError> {
    for field in REQUIRED_FIELDS {
        if !is_truthy(payload.get(field)) {
            return Err(ObserverError::validation(format!("Invalid input for {}", field)));
        }
    }

    let text = |field: &str| -> Result<String, ObserverError> {
        payload
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ObserverError::validation(format!("Invalid input for {}", field)))
    };

    let first_name = text("first_name")?;
    let last_name = text("last_name")?;
    let mobile_number = text("mobile_number")?;

    let reservation_date = payload
        .get("reservation_date")
        .and_then(Value::as_str)
        .and_then(parse_date)
        .ok_or_else(|| ObserverError::validation("Invalid input: reservation_date"))?;

    let reservation_time = payload
        .get("reservation_time")
        .and_then(Value::as_str)
        .and_then(parse_time)
        .ok_or_else(|| ObserverError::validation("Invalid input: reservation_time"))?;

    let people = payload
        .get("people")
        .and_then(as_i32)
        .filter(|p| *p >= 1)
        .ok_or_else(|| ObserverError::validation("Invalid input: people"))?;

    // Any other supplied status is ignored; new rows start booked
    match payload.get("status").and_then(Value::as_str).and_then(|s| s.parse().ok()) {
        Some(ReservationStatus::Seated) => return Err(ObserverError::validation("Status is already seated!")),
        Some(ReservationStatus::Finished) => {
            return Err(ObserverError::validation("Status is already finished!"))
        }
        _ => {}
    }

    Ok(NewReservation {
        first_name,
        last_name,
        mobile_number,
        reservation_date,
        reservation_time,
        people,
    })
}

/// `YYYY-MM-DD`, and a real calendar date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !DATE_PATTERN.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `HH:MM` or `HH:MM:SS`, and a real time of day
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    if !TIME_PATTERN.is_match(value) {
        return None;
    }
    let format = if value.len() == 5 { "%H:%M" } else { "%H:%M:%S" };
    NaiveTime::parse_from_str(value, format).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "first_name": "Rick",
            "last_name": "Sanchez",
            "mobile_number": "202-555-0164",
            "reservation_date": "2024-02-15",
            "reservation_time": "18:00",
            "people": 2
        })
    }

    fn message(payload: Value) -> String {
        match parse_reservation(&payload) {
            Err(ObserverError::ValidationError(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_a_complete_payload() {
        let parsed = parse_reservation(&valid()).unwrap();
        assert_eq!(parsed.first_name, "Rick");
        assert_eq!(parsed.people, 2);
        assert_eq!(parsed.reservation_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn reports_the_first_missing_field() {
        for field in REQUIRED_FIELDS {
            let mut payload = valid();
            payload.as_object_mut().unwrap().remove(field);
            assert_eq!(message(payload), format!("Invalid input for {}", field));
        }
    }

    #[test]
    fn empty_strings_and_zero_count_as_missing() {
        let mut payload = valid();
        payload["last_name"] = json!("");
        assert_eq!(message(payload), "Invalid input for last_name");

        let mut payload = valid();
        payload["people"] = json!(0);
        assert_eq!(message(payload), "Invalid input for people");
    }

    #[test]
    fn rejects_malformed_dates_and_times() {
        let mut payload = valid();
        payload["reservation_date"] = json!("not-a-date");
        assert_eq!(message(payload), "Invalid input: reservation_date");

        let mut payload = valid();
        payload["reservation_date"] = json!("2024-02-30");
        assert_eq!(message(payload), "Invalid input: reservation_date");

        let mut payload = valid();
        payload["reservation_time"] = json!("not-a-time");
        assert_eq!(message(payload), "Invalid input: reservation_time");

        let mut payload = valid();
        payload["reservation_time"] = json!("25:00");
        assert_eq!(message(payload), "Invalid input: reservation_time");
    }

    #[test]
    fn people_must_be_a_number() {
        let mut payload = valid();
        payload["people"] = json!("2");
        assert_eq!(message(payload), "Invalid input: people");
    }

    #[test]
    fn time_with_seconds_is_accepted() {
        assert_eq!(parse_time("21:30:00"), NaiveTime::from_hms_opt(21, 30, 0));
        assert_eq!(parse_time("9:30"), None);
    }

    #[test]
    fn preset_seated_or_finished_is_rejected() {
        let mut payload = valid();
        payload["status"] = json!("seated");
        assert_eq!(message(payload), "Status is already seated!");

        let mut payload = valid();
        payload["status"] = json!("finished");
        assert_eq!(message(payload), "Status is already finished!");
    }

    #[test]
    fn other_preset_statuses_are_ignored() {
        for status in ["booked", "cancelled", "whatever"] {
            let mut payload = valid();
            payload["status"] = json!(status);
            assert!(parse_reservation(&payload).is_ok(), "status {} should be ignored", status);
        }
    }
}
