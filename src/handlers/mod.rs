// Request handlers.
//
// Each handler turns the request into an ObserverContext, runs it through
// the pipeline and wraps the result in the `{ "data": ... }` envelope.

pub mod public;
pub mod reservations;
pub mod tables;
