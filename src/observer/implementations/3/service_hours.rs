// Ring 3: reservations must fall inside the service window
use async_trait::async_trait;
use chrono::Timelike;

use crate::database::models::NewReservation;
use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

/// Window bounds are `HHMM` integers, both inclusive
pub struct ServiceHoursValidator {
    opens_at: u32,
    closes_at: u32,
}

impl ServiceHoursValidator {
    pub fn new(opens_at: u32, closes_at: u32) -> Self {
        Self { opens_at, closes_at }
    }

    pub fn check(&self, reservation: &NewReservation) -> Result<(), ObserverError> {
        let time = reservation.reservation_time;
        let hhmm = time.hour() * 100 + time.minute();

        if hhmm < self.opens_at || hhmm > self.closes_at {
            return Err(ObserverError::validation(format!(
                "Reservations are only valid from {} to {}.",
                twelve_hour(self.opens_at),
                twelve_hour(self.closes_at)
            )));
        }
        Ok(())
    }
}

impl Observer for ServiceHoursValidator {
    fn name(&self) -> &'static str {
        "ServiceHoursValidator"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Business
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Reservation && matches!(op, Operation::Create | Operation::Update)
    }

    fn priority(&self) -> u8 {
        20
    }
}

#[async_trait]
impl GenericObserver for ServiceHoursValidator {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let reservation = ctx
            .get_metadata::<NewReservation>()
            .ok_or_else(|| ObserverError::missing("NewReservation"))?;
        self.check(reservation)
    }
}

/// 1030 -> "10:30 AM", 2130 -> "9:30 PM"
pub fn twelve_hour(hhmm: u32) -> String {
    let (hour, minute) = (hhmm / 100, hhmm % 100);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, minute, suffix)
}
