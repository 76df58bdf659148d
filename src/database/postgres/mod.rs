// PostgreSQL repositories (sqlx)

pub mod reservations;
pub mod tables;

pub use reservations::PgReservationRepository;
pub use tables::PgTableRepository;
