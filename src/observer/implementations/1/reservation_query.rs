// Ring 1: turns the list query string into a ReservationSearch
use async_trait::async_trait;

use super::reservation_fields::parse_date;
use crate::database::models::{mobile_digits, ReservationSearch};
use crate::observer::context::{ObserverContext, ReservationQuery};
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, Observer, ObserverRing};
use crate::types::{Entity, Operation};

#[derive(Default)]
pub struct ReservationQueryValidator;

impl Observer for ReservationQueryValidator {
    fn name(&self) -> &'static str {
        "ReservationQueryValidator"
    }

    fn ring(&self) -> ObserverRing {
        ObserverRing::InputValidation
    }

    fn applies_to(&self, entity: Entity, op: Operation) -> bool {
        entity == Entity::Reservation && op == Operation::List
    }
}

#[async_trait]
impl GenericObserver for ReservationQueryValidator {
    async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
        let query = ctx.take_metadata::<ReservationQuery>().unwrap_or_default();
        let search = search_for(&query)?;

        tracing::debug!("Reservation search: {:?}", search);
        ctx.set_metadata(search);
        Ok(())
    }
}

/// A mobile number wins over a date when both are given
pub fn search_for(query: &ReservationQuery) -> Result<ReservationSearch, ObserverError> {
    if let Some(mobile) = query.mobile_number.as_deref().filter(|m| !m.is_empty()) {
        return Ok(ReservationSearch::Mobile(mobile_digits(mobile)));
    }

    match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(date) => parse_date(date)
            .map(ReservationSearch::Date)
            .ok_or_else(|| ObserverError::validation("Invalid input: date")),
        None => Ok(ReservationSearch::All),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query(date: Option<&str>, mobile: Option<&str>) -> ReservationQuery {
        ReservationQuery {
            date: date.map(str::to_string),
            mobile_number: mobile.map(str::to_string),
        }
    }

    #[test]
    fn empty_query_lists_everything() {
        assert_eq!(search_for(&query(None, None)).unwrap(), ReservationSearch::All);
        assert_eq!(search_for(&query(Some(""), Some(""))).unwrap(), ReservationSearch::All);
    }

    #[test]
    fn mobile_takes_precedence() {
        let search = search_for(&query(Some("2024-02-15"), Some("(555) 12"))).unwrap();
        assert_eq!(search, ReservationSearch::Mobile("55512".into()));
    }

    #[test]
    fn date_must_be_valid() {
        let search = search_for(&query(Some("2024-02-15"), None)).unwrap();
        assert_eq!(search, ReservationSearch::Date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
        assert!(search_for(&query(Some("tomorrow"), None)).is_err());
    }
}
