// Ring 0: resolves the reservation named in a seat request body.
// Runs ahead of the table lookup.
use async_trait::async_trait;
use std::sync::Arc;

use crate::database::ReservationRepository;
use crate::observer::context::{ObserverContext, SeatRequest};
use crate::observer::error::ObserverError;
use crate::observer::payload::{as_id, is_truthy};
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

pub struct SeatReservationLoader {
    reservations: Arc<dyn ReservationRepository>,
}

impl SeatReservationLoader {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }
}

impl Observer for SeatReservationLoader {
    fn name(&self) -> &'static str {
        "SeatReservationLoader"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::DataPreparation
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Table && op == Operation::Seat
    }

    fn priority(&self) -> u8 {
        10
    }
}

#[async_trait]
impl GenericObserver for SeatReservationLoader {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let field = ctx.payload_field("reservation_id");
        if !is_truthy(field) {
            return Err(ObserverError::validation("No data or no reservation_id sent."));
        }
        let field = field.cloned().unwrap_or_default();

        let not_found = || {
            let shown = match &field {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            ObserverError::not_found(format!("{} not found", shown))
        };

        let reservation_id = as_id(&field).ok_or_else(not_found)?;
        let reservation = self
            .reservations
            .read(reservation_id)
            .await?
            .ok_or_else(not_found)?;

        ctx.set_metadata(SeatRequest { reservation });
        Ok(())
    }
}
