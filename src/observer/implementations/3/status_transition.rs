// Ring 3: reservation lifecycle rules for status updates
use async_trait::async_trait;
use serde_json::Value;

use crate::database::models::Reservation;
use crate::observer::context::{ObserverContext, StatusChange};
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation, ReservationStatus};

#[derive(Default)]
pub struct StatusTransitionValidator;

impl Observer for StatusTransitionValidator {
    fn name(&self) -> &'static str {
        "StatusTransitionValidator"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Business
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Reservation && op == Operation::UpdateStatus
    }
}

#[async_trait]
impl GenericObserver for StatusTransitionValidator {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let current = ctx
            .get_metadata::<Reservation>()
            .ok_or_else(|| ObserverError::missing("Reservation"))?
            .status;
        let requested = ctx.payload_field("status").and_then(Value::as_str);

        let status = transition(current, requested)?;
        ctx.set_metadata(StatusChange { status });
        Ok(())
    }
}

/// Terminal states are checked before the requested status is looked at.
pub fn transition(current: ReservationStatus, requested: Option<&str>) -> Result<ReservationStatus, ObserverError> {
    if current.is_terminal() {
        return Err(ObserverError::validation(format!(
            "{} reservations cannot be updated!",
            current
        )));
    }

    let unknown = || ObserverError::validation("unknown status cannot be updated!");
    requested.ok_or_else(unknown)?.parse::<ReservationStatus>().map_err(|e| {
        tracing::debug!("Rejected status change: {}", e);
        unknown()
    })
}
