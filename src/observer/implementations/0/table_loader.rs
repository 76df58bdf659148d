// Ring 0: loads the table addressed by the request path
use async_trait::async_trait;
use std::sync::Arc;

use crate::database::TableRepository;
use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

pub struct TableLoader {
    tables: Arc<dyn TableRepository>,
}

impl TableLoader {
    pub fn new(tables: Arc<dyn TableRepository>) -> Self {
        Self { tables }
    }
}

impl Observer for TableLoader {
    fn name(&self) -> &'static str {
        "TableLoader"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::DataPreparation
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Table && matches!(op, Operation::Read | Operation::Seat | Operation::Clear)
    }
}

#[async_trait]
impl GenericObserver for TableLoader {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let raw = ctx.target_id.clone().unwrap_or_default();
        let not_found = || ObserverError::not_found(format!("Table ID: {} Not Found", raw));

        let table_id: i32 = raw.parse().map_err(|_| not_found())?;
        let table = self.tables.read(table_id).await?.ok_or_else(not_found)?;

        ctx.set_metadata(table);
        Ok(())
    }
}
