// Ring 3: can this reservation sit at this table?
use async_trait::async_trait;

use crate::database::models::{Reservation, Table};
use crate::observer::context::{ObserverContext, SeatRequest};
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

#[derive(Default)]
pub struct SeatingRulesValidator;

impl Observer for SeatingRulesValidator {
    fn name(&self) -> &'static str {
        "SeatingRulesValidator"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Business
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Table && op == Operation::Seat
    }
}

#[async_trait]
impl GenericObserver for SeatingRulesValidator {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let request = ctx
            .get_metadata::<SeatRequest>()
            .ok_or_else(|| ObserverError::missing("SeatRequest"))?;
        let table = ctx
            .get_metadata::<Table>()
            .ok_or_else(|| ObserverError::missing("Table"))?;

        check_seating(&request.reservation, table)
    }
}

pub fn check_seating(reservation: &Reservation, table: &Table) -> Result<(), ObserverError> {
    if let Some(reason) = reservation.seating_blocker() {
        return Err(ObserverError::validation(reason));
    }

    if table.occupied {
        return Err(ObserverError::validation("Table is already occupied!"));
    }

    if reservation.people > table.capacity {
        return Err(ObserverError::validation("Table is over capacity!"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReservationStatus;
    use chrono::{NaiveDate, NaiveTime};

    fn party(people: i32, status: ReservationStatus) -> Reservation {
        Reservation {
            reservation_id: 5,
            first_name: "Tiger".into(),
            last_name: "Lion".into(),
            mobile_number: "808-555-0140".into(),
            reservation_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            reservation_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            people,
            status,
        }
    }

    fn table(capacity: i32, occupied: bool) -> Table {
        Table {
            table_id: 1,
            table_name: "Bar #1".into(),
            capacity,
            occupied,
            reservation_id: occupied.then_some(9),
        }
    }

    #[test]
    fn fits_a_free_table() {
        assert!(check_seating(&party(4, ReservationStatus::Booked), &table(4, false)).is_ok());
    }

    #[test]
    fn rejects_double_seating() {
        let err = check_seating(&party(2, ReservationStatus::Seated), &table(4, false)).unwrap_err();
        assert_eq!(err.to_string(), "5 already seated");
    }

    #[test]
    fn rejects_closed_reservations() {
        let err = check_seating(&party(2, ReservationStatus::Finished), &table(4, false)).unwrap_err();
        assert_eq!(err.to_string(), "5 is finished and cannot be seated");
        assert!(check_seating(&party(2, ReservationStatus::Cancelled), &table(4, false)).is_err());
    }

    #[test]
    fn rejects_occupied_tables() {
        let err = check_seating(&party(2, ReservationStatus::Booked), &table(4, true)).unwrap_err();
        assert_eq!(err.to_string(), "Table is already occupied!");
    }

    #[test]
    fn rejects_oversized_parties() {
        let err = check_seating(&party(5, ReservationStatus::Booked), &table(4, false)).unwrap_err();
        assert_eq!(err.to_string(), "Table is over capacity!");
    }
}
