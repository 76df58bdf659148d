// Ring 5: reservation repository calls
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::database::models::{NewReservation, Reservation, ReservationSearch};
use crate::database::ReservationRepository;
use crate::observer::context::{ObserverContext, StatusChange};
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

pub struct ReservationExecutor {
    reservations: Arc<dyn ReservationRepository>,
}

impl ReservationExecutor {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }
}

impl Observer for ReservationExecutor {
    fn name(&self) -> &'static str {
        "ReservationExecutor"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Database
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Reservation
            && matches!(
                op,
                Operation::List | Operation::Read | Operation::Create | Operation::Update | Operation::UpdateStatus
            )
    }
}

#[async_trait]
impl GenericObserver for ReservationExecutor {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let result = match ctx.operation {
            Operation::List => {
                let search = ctx
                    .get_metadata::<ReservationSearch>()
                    .cloned()
                    .unwrap_or(ReservationSearch::All);
                to_json(&self.reservations.list(&search).await?)?
            }
            Operation::Read => {
                let reservation = ctx
                    .take_metadata::<Reservation>()
                    .ok_or_else(|| ObserverError::missing("Reservation"))?;
                to_json(&reservation)?
            }
            Operation::Create => {
                let draft = ctx
                    .take_metadata::<NewReservation>()
                    .ok_or_else(|| ObserverError::missing("NewReservation"))?;
                to_json(&self.reservations.create(&draft).await?)?
            }
            Operation::Update => {
                let existing_id = ctx
                    .get_metadata::<Reservation>()
                    .ok_or_else(|| ObserverError::missing("Reservation"))?
                    .reservation_id;
                let changes = ctx
                    .take_metadata::<NewReservation>()
                    .ok_or_else(|| ObserverError::missing("NewReservation"))?;
                to_json(&self.reservations.update(existing_id, &changes).await?)?
            }
            Operation::UpdateStatus => {
                let existing_id = ctx
                    .get_metadata::<Reservation>()
                    .ok_or_else(|| ObserverError::missing("Reservation"))?
                    .reservation_id;
                let change = ctx
                    .get_metadata::<StatusChange>()
                    .copied()
                    .ok_or_else(|| ObserverError::missing("StatusChange"))?;
                let updated = self.reservations.update_status(existing_id, change.status).await?;
                json!({ "status": updated.status })
            }
            other => {
                return Err(ObserverError::PipelineError(format!(
                    "reservation executor cannot run {:?}",
                    other
                )))
            }
        };

        ctx.result = Some(result);
        Ok(())
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, ObserverError> {
    serde_json::to_value(value).map_err(|e| ObserverError::PipelineError(format!("serialization failed: {}", e)))
}
