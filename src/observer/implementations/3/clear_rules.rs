// Ring 3: only a table holding a reservation can be cleared
use async_trait::async_trait;

use crate::database::models::Table;
use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

#[derive(Default)]
pub struct ClearRulesValidator;

impl Observer for ClearRulesValidator {
    fn name(&self) -> &'static str {
        "ClearRulesValidator"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Business
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Table && op == Operation::Clear
    }
}

#[async_trait]
impl GenericObserver for ClearRulesValidator {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let table = ctx
            .get_metadata::<Table>()
            .ok_or_else(|| ObserverError::missing("Table"))?;

        if table.reservation_id.is_none() {
            return Err(ObserverError::validation(format!(
                "table {} is not occupied",
                table.table_id
            )));
        }
        Ok(())
    }
}
