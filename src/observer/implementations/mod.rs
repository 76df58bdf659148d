// Observer implementations organized by rings
// Each ring handles a specific phase of request processing

// Ring 0: Data Preparation - load addressed rows
#[path = "0/reservation_loader.rs"]
pub mod reservation_loader;
#[path = "0/seat_reservation_loader.rs"]
pub mod seat_reservation_loader;
#[path = "0/table_loader.rs"]
pub mod table_loader;

// Ring 1: Input Validation - typed requests from payloads
#[path = "1/reservation_fields.rs"]
pub mod reservation_fields;
#[path = "1/reservation_query.rs"]
pub mod reservation_query;
#[path = "1/table_fields.rs"]
pub mod table_fields;

// Ring 3: Business - calendar, hours, lifecycle and seating rules
#[path = "3/clear_rules.rs"]
pub mod clear_rules;
#[path = "3/seating_rules.rs"]
pub mod seating_rules;
#[path = "3/service_calendar.rs"]
pub mod service_calendar;
#[path = "3/service_hours.rs"]
pub mod service_hours;
#[path = "3/status_transition.rs"]
pub mod status_transition;

// Ring 5: Database - repository calls
#[path = "5/reservation_executor.rs"]
pub mod reservation_executor;
#[path = "5/table_executor.rs"]
pub mod table_executor;

// Helper for registering observers (not ring-specific)
pub mod registry;
pub use registry::*;

// Ring 0 re-exports
pub use reservation_loader::*;
pub use seat_reservation_loader::*;
pub use table_loader::*;

// Ring 1 re-exports
pub use reservation_fields::*;
pub use reservation_query::*;
pub use table_fields::*;

// Ring 3 re-exports
pub use clear_rules::*;
pub use seating_rules::*;
pub use service_calendar::*;
pub use service_hours::*;
pub use status_transition::*;

// Ring 5 re-exports
pub use reservation_executor::*;
pub use table_executor::*;
