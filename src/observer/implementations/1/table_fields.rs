// Ring 1: validates a table payload into a NewTable
use async_trait::async_trait;
use serde_json::Value;

use crate::database::models::NewTable;
use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::payload::{as_i32, is_truthy};
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

#[derive(Default)]
pub struct TableFieldsValidator;

impl Observer for TableFieldsValidator {
    fn name(&self) -> &'static str {
        "TableFieldsValidator"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::InputValidation
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Table && op == Operation::Create
    }
}

#[async_trait]
impl GenericObserver for TableFieldsValidator {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let payload = ctx
            .payload
            .as_ref()
            .ok_or_else(|| ObserverError::validation("Invalid table parameters!"))?;

        let table = parse_table(payload)?;
        ctx.set_metadata(table);
        Ok(())
    }
}

pub fn parse_table(payload: &Value) -> Result<NewTable, ObserverError> {
    if !is_truthy(payload.get("capacity")) {
        return Err(ObserverError::validation("Invalid table capacity!"));
    }

    let table_name = payload
        .get("table_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ObserverError::validation("Invalid table_name!"))?;

    let capacity = payload
        .get("capacity")
        .and_then(as_i32)
        .filter(|c| *c >= 1)
        .ok_or_else(|| ObserverError::validation("Table must be able to accommodate at least 1 person!"))?;

    if table_name.chars().count() < 2 {
        return Err(ObserverError::validation("table_name must be at least 2 characters!"));
    }

    Ok(NewTable {
        table_name: table_name.to_string(),
        capacity,
    })
}
