use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::info;

use super::reservations::{claim_for_seating, fetch, write_status};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewTable, Table};
use crate::database::repository::TableRepository;
use crate::types::ReservationStatus;

const COLUMNS: &str = "table_id, table_name, capacity, occupied, reservation_id";

pub struct PgTableRepository {
    pool: PgPool,
}

impl PgTableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Explain why the guarded table update matched no row
    async fn seat_refusal(&self, table_id: i32) -> DatabaseError {
        let table = match self.read(table_id).await {
            Ok(table) => table,
            Err(e) => return e,
        };
        match table {
            None => DatabaseError::NotFound(format!("Table ID: {} Not Found", table_id)),
            Some(table) if table.occupied => DatabaseError::Conflict("Table is already occupied!".to_string()),
            Some(_) => DatabaseError::Conflict("Table is over capacity!".to_string()),
        }
    }
}

/// Free every table held by the reservation. Returns how many were released.
pub(crate) async fn release_tables<'e, E>(executor: E, reservation_id: i32) -> Result<u64, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("UPDATE tables SET occupied = false, reservation_id = NULL WHERE reservation_id = $1")
        .bind(reservation_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

#[async_trait]
impl TableRepository for PgTableRepository {
    async fn list(&self) -> Result<Vec<Table>, DatabaseError> {
        let sql = format!("SELECT {} FROM tables ORDER BY table_name", COLUMNS);
        let rows = sqlx::query_as::<_, Table>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn read(&self, table_id: i32) -> Result<Option<Table>, DatabaseError> {
        let sql = format!("SELECT {} FROM tables WHERE table_id = $1", COLUMNS);
        let row = sqlx::query_as::<_, Table>(&sql)
            .bind(table_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, table: &NewTable) -> Result<Table, DatabaseError> {
        let sql = format!(
            "INSERT INTO tables (table_name, capacity, occupied, reservation_id) \
             VALUES ($1, $2, false, NULL) RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, Table>(&sql)
            .bind(&table.table_name)
            .bind(table.capacity)
            .fetch_one(&self.pool)
            .await?;

        info!("Created table {} ({})", row.table_id, row.table_name);
        Ok(row)
    }

    async fn seat(&self, table_id: i32, reservation_id: i32) -> Result<Table, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Reservation first: the status guard serializes seats of one reservation
        let Some(reservation) = claim_for_seating(&mut *tx, reservation_id).await? else {
            let current = fetch(&mut *tx, reservation_id).await?;
            tx.rollback().await?;
            return Err(match current {
                None => DatabaseError::NotFound(format!("{} not found", reservation_id)),
                Some(row) => DatabaseError::Conflict(
                    row.seating_blocker()
                        .unwrap_or_else(|| format!("{} already seated", reservation_id)),
                ),
            });
        };

        let sql = format!(
            "UPDATE tables SET occupied = true, reservation_id = $2 \
             WHERE table_id = $1 AND occupied = false AND capacity >= $3 RETURNING {}",
            COLUMNS
        );
        let table = sqlx::query_as::<_, Table>(&sql)
            .bind(table_id)
            .bind(reservation_id)
            .bind(reservation.people)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(table) = table else {
            tx.rollback().await?;
            return Err(self.seat_refusal(table_id).await);
        };

        tx.commit().await?;
        info!("Seated reservation {} at table {}", reservation_id, table_id);
        Ok(table)
    }

    async fn clear(&self, table_id: i32) -> Result<Table, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so the reservation we finish is the one we release
        let reservation_id: Option<Option<i32>> =
            sqlx::query_scalar("SELECT reservation_id FROM tables WHERE table_id = $1 FOR UPDATE")
                .bind(table_id)
                .fetch_optional(&mut *tx)
                .await?;

        let reservation_id = match reservation_id {
            None => {
                tx.rollback().await?;
                return Err(DatabaseError::NotFound(format!("Table ID: {} Not Found", table_id)));
            }
            Some(None) => {
                tx.rollback().await?;
                return Err(DatabaseError::Conflict(format!("table {} is not occupied", table_id)));
            }
            Some(Some(id)) => id,
        };

        let sql = format!(
            "UPDATE tables SET occupied = false, reservation_id = NULL WHERE table_id = $1 RETURNING {}",
            COLUMNS
        );
        let table = sqlx::query_as::<_, Table>(&sql)
            .bind(table_id)
            .fetch_one(&mut *tx)
            .await?;

        write_status(&mut *tx, reservation_id, ReservationStatus::Finished).await?;

        tx.commit().await?;
        info!("Cleared table {} (reservation {} finished)", table_id, reservation_id);
        Ok(table)
    }
}
