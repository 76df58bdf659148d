// Ring 3: the restaurant's closed weekday, and no bookings in the past
use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime, Weekday};
use std::sync::Arc;

use crate::clock::Clock;
use crate::database::models::NewReservation;
use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

pub struct ServiceCalendarValidator {
    closed_weekday: Weekday,
    clock: Arc<dyn Clock>,
}

impl ServiceCalendarValidator {
    pub fn new(closed_weekday: Weekday, clock: Arc<dyn Clock>) -> Self {
        Self { closed_weekday, clock }
    }

    pub fn check(&self, reservation: &NewReservation) -> Result<(), ObserverError> {
        if reservation.reservation_date.weekday() == self.closed_weekday {
            return Err(ObserverError::validation(format!(
                "Restaurant is closed on {}s!",
                weekday_name(self.closed_weekday)
            )));
        }

        let requested = NaiveDateTime::new(reservation.reservation_date, reservation.reservation_time);
        if requested < self.clock.now() {
            return Err(ObserverError::validation("Reservations must be for a future date!"));
        }

        Ok(())
    }
}

impl Observer for ServiceCalendarValidator {
    fn name(&self) -> &'static str {
        "ServiceCalendarValidator"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Business
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Reservation && matches!(op, Operation::Create | Operation::Update)
    }

    fn priority(&self) -> u8 {
        10
    }
}

#[async_trait]
impl GenericObserver for ServiceCalendarValidator {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let reservation = ctx
            .get_metadata::<NewReservation>()
            .ok_or_else(|| ObserverError::missing("NewReservation"))?;
        self.check(reservation)
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
