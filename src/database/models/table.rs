use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Table {
    pub table_id: i32,
    pub table_name: String,
    pub capacity: i32,
    pub occupied: bool,
    pub reservation_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTable {
    pub table_name: String,
    pub capacity: i32,
}

impl NewTable {
    /// New tables are free and reference no reservation.
    pub fn into_table(self, table_id: i32) -> Table {
        Table {
            table_id,
            table_name: self.table_name,
            capacity: self.capacity,
            occupied: false,
            reservation_id: None,
        }
    }
}
