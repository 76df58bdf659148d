// In-process store for development and tests.
//
// Both entities live behind one lock, which is what makes seat/clear atomic.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::{mobile_digits, NewReservation, NewTable, Reservation, ReservationSearch, Table};
use crate::database::repository::{ReservationRepository, TableRepository};
use crate::types::ReservationStatus;

#[derive(Debug, Default)]
struct MemoryState {
    reservations: BTreeMap<i32, Reservation>,
    tables: BTreeMap<i32, Table>,
    last_reservation_id: i32,
    last_table_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn reservation_not_found(reservation_id: i32) -> DatabaseError {
    DatabaseError::NotFound(format!("{} not found", reservation_id))
}

fn table_not_found(table_id: i32) -> DatabaseError {
    DatabaseError::NotFound(format!("Table ID: {} Not Found", table_id))
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn list(&self, search: &ReservationSearch) -> Result<Vec<Reservation>, DatabaseError> {
        let state = self.state.read().await;
        let mut rows: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|r| match search {
                ReservationSearch::All => true,
                ReservationSearch::Date(date) => r.reservation_date == *date,
                ReservationSearch::Mobile(digits) => mobile_digits(&r.mobile_number).contains(digits.as_str()),
            })
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.reservation_date, r.reservation_time, r.reservation_id));
        Ok(rows)
    }

    async fn read(&self, reservation_id: i32) -> Result<Option<Reservation>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.reservations.get(&reservation_id).cloned())
    }

    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, DatabaseError> {
        let mut state = self.state.write().await;
        state.last_reservation_id += 1;
        let row = reservation.clone().into_reservation(state.last_reservation_id);
        state.reservations.insert(row.reservation_id, row.clone());

        info!("Created reservation {}", row.reservation_id);
        Ok(row)
    }

    async fn update(&self, reservation_id: i32, changes: &NewReservation) -> Result<Reservation, DatabaseError> {
        let mut state = self.state.write().await;
        let row = state
            .reservations
            .get_mut(&reservation_id)
            .ok_or_else(|| reservation_not_found(reservation_id))?;
        row.apply(changes);

        info!("Updated reservation {}", reservation_id);
        Ok(row.clone())
    }

    async fn update_status(
        &self,
        reservation_id: i32,
        status: ReservationStatus,
    ) -> Result<Reservation, DatabaseError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let row = state
            .reservations
            .get_mut(&reservation_id)
            .ok_or_else(|| reservation_not_found(reservation_id))?;
        row.status = status;
        let row = row.clone();

        // Only a seated reservation may hold a table
        if status != ReservationStatus::Seated {
            for table in state.tables.values_mut() {
                if table.reservation_id == Some(reservation_id) {
                    table.occupied = false;
                    table.reservation_id = None;
                    info!("Released table {} from reservation {}", table.table_id, reservation_id);
                }
            }
        }

        info!("Reservation {} is now {}", reservation_id, status);
        Ok(row)
    }
}

#[async_trait]
impl TableRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Table>, DatabaseError> {
        let state = self.state.read().await;
        let mut rows: Vec<Table> = state.tables.values().cloned().collect();
        rows.sort_by(|a, b| a.table_name.cmp(&b.table_name));
        Ok(rows)
    }

    async fn read(&self, table_id: i32) -> Result<Option<Table>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.tables.get(&table_id).cloned())
    }

    async fn create(&self, table: &NewTable) -> Result<Table, DatabaseError> {
        let mut state = self.state.write().await;
        state.last_table_id += 1;
        let row = table.clone().into_table(state.last_table_id);
        state.tables.insert(row.table_id, row.clone());

        info!("Created table {} ({})", row.table_id, row.table_name);
        Ok(row)
    }

    async fn seat(&self, table_id: i32, reservation_id: i32) -> Result<Table, DatabaseError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        // Check both rows before touching either
        let table = state.tables.get_mut(&table_id).ok_or_else(|| table_not_found(table_id))?;
        if table.occupied {
            return Err(DatabaseError::Conflict("Table is already occupied!".to_string()));
        }
        let reservation = state
            .reservations
            .get_mut(&reservation_id)
            .ok_or_else(|| reservation_not_found(reservation_id))?;
        if let Some(reason) = reservation.seating_blocker() {
            return Err(DatabaseError::Conflict(reason));
        }
        if reservation.people > table.capacity {
            return Err(DatabaseError::Conflict("Table is over capacity!".to_string()));
        }

        table.occupied = true;
        table.reservation_id = Some(reservation_id);
        reservation.status = ReservationStatus::Seated;

        info!("Seated reservation {} at table {}", reservation_id, table_id);
        Ok(table.clone())
    }

    async fn clear(&self, table_id: i32) -> Result<Table, DatabaseError> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let table = state.tables.get_mut(&table_id).ok_or_else(|| table_not_found(table_id))?;
        let reservation_id = table
            .reservation_id
            .ok_or_else(|| DatabaseError::Conflict(format!("table {} is not occupied", table_id)))?;

        table.occupied = false;
        table.reservation_id = None;
        if let Some(reservation) = state.reservations.get_mut(&reservation_id) {
            reservation.status = ReservationStatus::Finished;
        }

        info!("Cleared table {} (reservation {} finished)", table_id, reservation_id);
        Ok(table.clone())
    }
}
