pub mod reservation;
pub mod table;

pub use reservation::{mobile_digits, NewReservation, Reservation, ReservationSearch};
pub use table::{NewTable, Table};
