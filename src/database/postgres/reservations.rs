use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::info;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewReservation, Reservation, ReservationSearch};
use crate::database::postgres::tables::release_tables;
use crate::database::repository::ReservationRepository;
use crate::types::ReservationStatus;

const COLUMNS: &str = "reservation_id, first_name, last_name, mobile_number, \
     reservation_date, reservation_time, people, status";

pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Status write shared with the table transactions.
/// Returns `None` when no reservation has that id.
pub(crate) async fn write_status<'e, E>(
    executor: E,
    reservation_id: i32,
    status: ReservationStatus,
) -> Result<Option<Reservation>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "UPDATE reservations SET status = $2 WHERE reservation_id = $1 RETURNING {}",
        COLUMNS
    );
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(reservation_id)
        .bind(status.as_str())
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Flip a `booked` reservation to `seated`. `None` when the row is missing or
/// not `booked`, so two seat attempts for one reservation cannot both win.
pub(crate) async fn claim_for_seating<'e, E>(
    executor: E,
    reservation_id: i32,
) -> Result<Option<Reservation>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "UPDATE reservations SET status = $2 WHERE reservation_id = $1 AND status = $3 RETURNING {}",
        COLUMNS
    );
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(reservation_id)
        .bind(ReservationStatus::Seated.as_str())
        .bind(ReservationStatus::Booked.as_str())
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub(crate) async fn fetch<'e, E>(executor: E, reservation_id: i32) -> Result<Option<Reservation>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let sql = format!("SELECT {} FROM reservations WHERE reservation_id = $1", COLUMNS);
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(reservation_id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

fn not_found(reservation_id: i32) -> DatabaseError {
    DatabaseError::NotFound(format!("{} not found", reservation_id))
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn list(&self, search: &ReservationSearch) -> Result<Vec<Reservation>, DatabaseError> {
        let rows = match search {
            ReservationSearch::All => {
                let sql = format!(
                    "SELECT {} FROM reservations ORDER BY reservation_date, reservation_time",
                    COLUMNS
                );
                sqlx::query_as::<_, Reservation>(&sql).fetch_all(&self.pool).await?
            }
            ReservationSearch::Date(date) => {
                let sql = format!(
                    "SELECT {} FROM reservations WHERE reservation_date = $1 ORDER BY reservation_time",
                    COLUMNS
                );
                sqlx::query_as::<_, Reservation>(&sql)
                    .bind(date)
                    .fetch_all(&self.pool)
                    .await?
            }
            ReservationSearch::Mobile(digits) => {
                let sql = format!(
                    "SELECT {} FROM reservations \
                     WHERE regexp_replace(mobile_number, '[^0-9]', '', 'g') LIKE $1 \
                     ORDER BY reservation_date, reservation_time",
                    COLUMNS
                );
                sqlx::query_as::<_, Reservation>(&sql)
                    .bind(format!("%{}%", digits))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn read(&self, reservation_id: i32) -> Result<Option<Reservation>, DatabaseError> {
        fetch(&self.pool, reservation_id).await
    }

    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, DatabaseError> {
        let sql = format!(
            "INSERT INTO reservations \
             (first_name, last_name, mobile_number, reservation_date, reservation_time, people, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, Reservation>(&sql)
            .bind(&reservation.first_name)
            .bind(&reservation.last_name)
            .bind(&reservation.mobile_number)
            .bind(reservation.reservation_date)
            .bind(reservation.reservation_time)
            .bind(reservation.people)
            .bind(ReservationStatus::Booked.as_str())
            .fetch_one(&self.pool)
            .await?;

        info!("Created reservation {}", row.reservation_id);
        Ok(row)
    }

    async fn update(&self, reservation_id: i32, changes: &NewReservation) -> Result<Reservation, DatabaseError> {
        let sql = format!(
            "UPDATE reservations SET first_name = $2, last_name = $3, mobile_number = $4, \
             reservation_date = $5, reservation_time = $6, people = $7 \
             WHERE reservation_id = $1 RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query_as::<_, Reservation>(&sql)
            .bind(reservation_id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.mobile_number)
            .bind(changes.reservation_date)
            .bind(changes.reservation_time)
            .bind(changes.people)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(reservation_id))?;

        info!("Updated reservation {}", reservation_id);
        Ok(row)
    }

    async fn update_status(
        &self,
        reservation_id: i32,
        status: ReservationStatus,
    ) -> Result<Reservation, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let Some(row) = write_status(&mut *tx, reservation_id, status).await? else {
            tx.rollback().await?;
            return Err(not_found(reservation_id));
        };

        // Only a seated reservation may hold a table
        if status != ReservationStatus::Seated {
            let released = release_tables(&mut *tx, reservation_id).await?;
            if released > 0 {
                info!("Released {} table(s) from reservation {}", released, reservation_id);
            }
        }

        tx.commit().await?;
        info!("Reservation {} is now {}", reservation_id, status);
        Ok(row)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
