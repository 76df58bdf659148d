use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::memory::MemoryStore;
use crate::database::models::{NewReservation, NewTable, Reservation, ReservationSearch, Table};
use crate::database::postgres::{PgReservationRepository, PgTableRepository};
use crate::types::ReservationStatus;

/// Data access for reservations
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn list(&self, search: &ReservationSearch) -> Result<Vec<Reservation>, DatabaseError>;

    async fn read(&self, reservation_id: i32) -> Result<Option<Reservation>, DatabaseError>;

    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, DatabaseError>;

    /// Overwrite editable fields. `NotFound` if the row is gone.
    async fn update(&self, reservation_id: i32, changes: &NewReservation) -> Result<Reservation, DatabaseError>;

    /// `NotFound` if the row is gone.
    async fn update_status(
        &self,
        reservation_id: i32,
        status: ReservationStatus,
    ) -> Result<Reservation, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Data access for tables.
///
/// `seat` and `clear` write both the table and the referenced reservation;
/// implementations must apply the two writes atomically.
#[async_trait]
pub trait TableRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Table>, DatabaseError>;

    async fn read(&self, table_id: i32) -> Result<Option<Table>, DatabaseError>;

    async fn create(&self, table: &NewTable) -> Result<Table, DatabaseError>;

    /// Occupy the table with the reservation and mark the reservation `seated`.
    /// `Conflict` if the table is already occupied.
    async fn seat(&self, table_id: i32, reservation_id: i32) -> Result<Table, DatabaseError>;

    /// Free the table and mark its reservation `finished`.
    /// `Conflict` if the table holds no reservation.
    async fn clear(&self, table_id: i32) -> Result<Table, DatabaseError>;
}

/// The repositories a running service talks to
#[derive(Clone)]
pub struct Repositories {
    pub reservations: Arc<dyn ReservationRepository>,
    pub tables: Arc<dyn TableRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            reservations: Arc::new(PgReservationRepository::new(pool.clone())),
            tables: Arc::new(PgTableRepository::new(pool)),
        }
    }

    /// Both repositories share one store so seat/clear stay atomic
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            reservations: store.clone(),
            tables: store,
        }
    }
}
