// Helper function for registering the full observer set
use std::sync::Arc;

use super::{
    ClearRulesValidator, ReservationExecutor, ReservationFieldsValidator, ReservationLoader,
    ReservationQueryValidator, SeatReservationLoader, SeatingRulesValidator, ServiceCalendarValidator,
    ServiceHoursValidator, StatusTransitionValidator, TableExecutor, TableFieldsValidator, TableLoader,
};
use crate::clock::Clock;
use crate::config::RestaurantConfig;
use crate::database::Repositories;
use crate::observer::pipeline::ObserverPipeline;

/// Register every observer the reservation and table endpoints rely on
pub fn register_all_observers(
    pipeline: &mut ObserverPipeline,
    repositories: &Repositories,
    restaurant: &RestaurantConfig,
    clock: Arc<dyn Clock>,
) {
    // Ring 0
    pipeline.register_observer(Box::new(ReservationLoader::new(repositories.reservations.clone())));
    pipeline.register_observer(Box::new(SeatReservationLoader::new(repositories.reservations.clone())));
    pipeline.register_observer(Box::new(TableLoader::new(repositories.tables.clone())));

    // Ring 1
    pipeline.register_observer(Box::new(ReservationFieldsValidator));
    pipeline.register_observer(Box::new(ReservationQueryValidator));
    pipeline.register_observer(Box::new(TableFieldsValidator));

    // Ring 3
    pipeline.register_observer(Box::new(ServiceCalendarValidator::new(restaurant.closed_weekday, clock)));
    pipeline.register_observer(Box::new(ServiceHoursValidator::new(restaurant.opens_at, restaurant.closes_at)));
    pipeline.register_observer(Box::new(StatusTransitionValidator));
    pipeline.register_observer(Box::new(SeatingRulesValidator));
    pipeline.register_observer(Box::new(ClearRulesValidator));

    // Ring 5
    pipeline.register_observer(Box::new(ReservationExecutor::new(repositories.reservations.clone())));
    pipeline.register_observer(Box::new(TableExecutor::new(repositories.tables.clone())));
}
