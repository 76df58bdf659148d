// Ring 0: loads the reservation addressed by the request path
use async_trait::async_trait;
use std::sync::Arc;

use crate::database::ReservationRepository;
use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

pub struct ReservationLoader {
    reservations: Arc<dyn ReservationRepository>,
}

impl ReservationLoader {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }
}

impl Observer for ReservationLoader {
    fn name(&self) -> &'static str {
        "ReservationLoader"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::DataPreparation
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Reservation
            && matches!(op, Operation::Read | Operation::Update | Operation::UpdateStatus)
    }
}

#[async_trait]
impl GenericObserver for ReservationLoader {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let raw = ctx.target_id.clone().unwrap_or_default();
        let not_found = || ObserverError::not_found(format!("{} not found", raw));

        let reservation_id: i32 = raw.parse().map_err(|_| not_found())?;
        let reservation = self
            .reservations
            .read(reservation_id)
            .await?
            .ok_or_else(not_found)?;

        ctx.set_metadata(reservation);
        Ok(())
    }
}
