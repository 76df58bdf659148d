// Ring 5: table repository calls, including the two-entity seat/clear writes
use async_trait::async_trait;
use std::sync::Arc;

use super::reservation_executor::to_json;
use crate::database::models::{NewTable, Table};
use crate::database::TableRepository;
use crate::observer::context::{ObserverContext, SeatRequest};
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

pub struct TableExecutor {
    tables: Arc<dyn TableRepository>,
}

impl TableExecutor {
    pub fn new(tables: Arc<dyn TableRepository>) -> Self {
        Self { tables }
    }
}

impl Observer for TableExecutor {
    fn name(&self) -> &'static str {
        "TableExecutor"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::Database
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Table
            && matches!(
                op,
                Operation::List | Operation::Read | Operation::Create | Operation::Seat | Operation::Clear
            )
    }
}

#[async_trait]
impl GenericObserver for TableExecutor {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let result = match ctx.operation {
            Operation::List => to_json(&self.tables.list().await?)?,
            Operation::Read => {
                let table = ctx.take_metadata::<Table>().ok_or_else(|| ObserverError::missing("Table"))?;
                to_json(&table)?
            }
            Operation::Create => {
                let draft = ctx
                    .take_metadata::<NewTable>()
                    .ok_or_else(|| ObserverError::missing("NewTable"))?;
                to_json(&self.tables.create(&draft).await?)?
            }
            Operation::Seat => {
                let table_id = ctx
                    .get_metadata::<Table>()
                    .ok_or_else(|| ObserverError::missing("Table"))?
                    .table_id;
                let reservation_id = ctx
                    .get_metadata::<SeatRequest>()
                    .ok_or_else(|| ObserverError::missing("SeatRequest"))?
                    .reservation
                    .reservation_id;
                to_json(&self.tables.seat(table_id, reservation_id).await?)?
            }
            Operation::Clear => {
                let table_id = ctx
                    .get_metadata::<Table>()
                    .ok_or_else(|| ObserverError::missing("Table"))?
                    .table_id;
                to_json(&self.tables.clear(table_id).await?)?
            }
            other => {
                return Err(ObserverError::PipelineError(format!(
                    "table executor cannot run {:?}",
                    other
                )))
            }
        };

        ctx.result = Some(result);
        Ok(())
    }
}
