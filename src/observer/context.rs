use serde::Deserialize;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::time::Instant;

use crate::database::models::Reservation;
use crate::observer::traits::ObserverRing;
use crate::types::{Entity, Operation, ReservationStatus};

/// The data structure that flows through the observer pipeline
#[derive(Debug)]
pub struct ObserverContext {
    // Core request data
    pub entity: Entity,
    pub operation: Operation,

    /// Raw id from the request path, parsed by the ring 0 loaders
    pub target_id: Option<String>,

    /// Contents of the request body's `data` member
    pub payload: Option<Value>,

    // Response body, populated by ring 5
    pub result: Option<Value>,

    // Type-safe metadata storage for cross-observer communication
    metadata: HashMap<TypeId, Box<dyn Any + Send>>,

    // Performance tracking
    pub start_time: Instant,
    pub current_ring: Option<ObserverRing>,
}

impl ObserverContext {
    pub fn new(entity: Entity, operation: Operation) -> Self {
        Self {
            entity,
            operation,
            target_id: None,
            payload: None,
            result: None,
            metadata: HashMap::new(),
            start_time: Instant::now(),
            current_ring: None,
        }
    }

    pub fn with_target(mut self, id: impl Into<String>) -> Self {
        self.target_id = Some(id.into());
        self
    }

    pub fn with_payload(mut self, payload: Option<Value>) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_metadata<T: Send + 'static>(mut self, data: T) -> Self {
        self.set_metadata(data);
        self
    }

    /// Store typed metadata - compile-time type safety
    pub fn set_metadata<T: Send + 'static>(&mut self, data: T) {
        self.metadata.insert(TypeId::of::<T>(), Box::new(data));
    }

    /// Retrieve typed metadata - compile-time type safety
    pub fn get_metadata<T: Send + 'static>(&self) -> Option<&T> {
        self.metadata
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// Move typed metadata out of the context
    pub fn take_metadata<T: Send + 'static>(&mut self) -> Option<T> {
        self.metadata
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Check if metadata of type T exists
    pub fn has_metadata<T: Send + 'static>(&self) -> bool {
        self.metadata.contains_key(&TypeId::of::<T>())
    }

    /// Look up a member of the payload object
    pub fn payload_field(&self, name: &str) -> Option<&Value> {
        self.payload.as_ref().and_then(|p| p.get(name))
    }

    /// Get total execution time
    pub fn execution_time(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

// Strongly-typed metadata structs for cross-observer communication

/// Query string of `GET /reservations`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationQuery {
    pub date: Option<String>,
    pub mobile_number: Option<String>,
}

/// Validated target of a status update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: ReservationStatus,
}

/// The reservation named in a seat request body
#[derive(Debug, Clone)]
pub struct SeatRequest {
    pub reservation: Reservation,
}
