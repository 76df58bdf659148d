/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entities served by the API
/// Used by the observer pipeline to pick which observers apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Reservation,
    Table,
}

/// Operations a request can perform against an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    UpdateStatus, // Reservation lifecycle change
    Seat,         // Assign a reservation to a table
    Clear,        // Release a table and finish its reservation
}

/// Reservation lifecycle.
///
/// `booked` is the only valid starting state. `finished` and `cancelled`
/// accept no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Finished,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => "booked",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Finished => "finished",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Finished | ReservationStatus::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reservation status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(ReservationStatus::Booked),
            "seated" => Ok(ReservationStatus::Seated),
            "finished" => Ok(ReservationStatus::Finished),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!("booked".parse::<ReservationStatus>(), Ok(ReservationStatus::Booked));
        assert_eq!("cancelled".parse::<ReservationStatus>(), Ok(ReservationStatus::Cancelled));
        assert!("Seated".parse::<ReservationStatus>().is_err());
        assert!("".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn unknown_status_names_the_value() {
        let err = "eaten".parse::<ReservationStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("eaten".into()));
        assert_eq!(err.to_string(), "unknown reservation status: eaten");
    }

    #[test]
    fn terminal_states() {
        assert!(ReservationStatus::Finished.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::Booked.is_terminal());
        assert!(!ReservationStatus::Seated.is_terminal());
    }

    #[test]
    fn serializes_lowercase() {
        let v = serde_json::to_value(ReservationStatus::Seated).unwrap();
        assert_eq!(v, serde_json::json!("seated"));
    }
}
