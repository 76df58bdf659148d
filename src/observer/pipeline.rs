// Observer pipeline: ring-ordered, short-circuiting execution

use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::observer::context::ObserverContext;
use crate::observer::error::ObserverError;
use crate::observer::traits::{GenericObserver, ObserverRing};

/// Executes registered observers in ring order, then by priority within a ring.
/// Stops at the first observer that fails.
pub struct ObserverPipeline {
    // Observer registry by ring
    observers: BTreeMap<ObserverRing, Vec<Box<dyn GenericObserver>>>,
}

impl ObserverPipeline {
    /// Create new observer pipeline with empty observer registry
    pub fn new() -> Self {
        Self {
            observers: BTreeMap::new(),
        }
    }

    /// Register an observer
    pub fn register_observer(&mut self, observer: Box<dyn GenericObserver>) {
        let ring = observer.ring();
        let name = observer.name();
        let ring_observers = self.observers.entry(ring).or_default();
        ring_observers.push(observer);
        ring_observers.sort_by_key(|o| o.priority());

        tracing::debug!("Registered observer '{}' for ring {:?}", name, ring);
    }

    /// Number of observers registered across all rings
    pub fn len(&self) -> usize {
        self.observers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the chain for one request and return the response body's `data`
    pub async fn execute(&self, mut ctx: ObserverContext) -> Result<Value, ObserverError> {
        tracing::info!(
            "Observer pipeline starting: entity={:?}, operation={:?}, target={:?}",
            ctx.entity,
            ctx.operation,
            ctx.target_id
        );

        for (&ring, observers) in &self.observers {
            ctx.current_ring = Some(ring);

            for observer in observers {
                if !observer.applies_to(ctx.entity, ctx.operation) {
                    tracing::trace!(
                        "Observer {} skipped - doesn't apply to {:?} {:?}",
                        observer.name(),
                        ctx.entity,
                        ctx.operation
                    );
                    continue;
                }

                let observer_start = Instant::now();
                let result = observer.execute(&mut ctx).await;
                let execution_time = observer_start.elapsed();

                match result {
                    Ok(()) => {
                        tracing::debug!(
                            "Observer: {} completed successfully in {:?}",
                            observer.name(),
                            execution_time
                        );
                    }
                    Err(error) => {
                        tracing::warn!(
                            "Observer: {} rejected {:?} {:?} at ring {:?}: {}",
                            observer.name(),
                            ctx.entity,
                            ctx.operation,
                            ring,
                            error
                        );
                        return Err(error);
                    }
                }
            }
        }

        tracing::debug!("Observer pipeline finished in {:?}", ctx.execution_time());

        ctx.result.take().ok_or_else(|| {
            ObserverError::PipelineError(format!(
                "no observer produced a result for {:?} {:?}",
                ctx.entity, ctx.operation
            ))
        })
    }
}

impl Default for ObserverPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::traits::Observer;
    use crate::types::{Entity, Operation};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Records its name into a shared log and optionally fails
    struct Probe {
        name: &'static str,
        ring: ObserverRing,
        priority: u8,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Observer for Probe {
        fn name(&self) -> &'static str {
            self.name
        }
        fn ring(&self) -> ObserverRing {
            self.ring
        }
        fn applies_to(&self, entity: Entity, _op: Operation) -> bool {
            entity == Entity::Table
        }
        fn priority(&self) -> u8 {
            self.priority
        }
    }

    #[async_trait]
    impl GenericObserver for Probe {
        async fn execute(&self, ctx: &mut ObserverContext) -> Result<(), ObserverError> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                return Err(ObserverError::validation(self.name));
            }
            if self.ring == ObserverRing::Database {
                ctx.result = Some(json!(self.name));
            }
            Ok(())
        }
    }

    fn probe(
        log: &Arc<Mutex<Vec<&'static str>>>,
        name: &'static str,
        ring: ObserverRing,
        priority: u8,
        fail: bool,
    ) -> Box<dyn GenericObserver> {
        Box::new(Probe { name, ring, priority, fail, log: log.clone() })
    }

    #[tokio::test]
    async fn runs_by_ring_then_priority() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = ObserverPipeline::new();
        pipeline.register_observer(probe(&log, "db", ObserverRing::Database, 50, false));
        pipeline.register_observer(probe(&log, "late", ObserverRing::Business, 90, false));
        pipeline.register_observer(probe(&log, "early", ObserverRing::Business, 10, false));
        pipeline.register_observer(probe(&log, "load", ObserverRing::DataPreparation, 50, false));

        let out = pipeline
            .execute(ObserverContext::new(Entity::Table, Operation::List))
            .await
            .unwrap();

        assert_eq!(out, json!("db"));
        assert_eq!(*log.lock().unwrap(), vec!["load", "early", "late", "db"]);
        assert_eq!(pipeline.len(), 4);
    }

    #[tokio::test]
    async fn first_failure_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = ObserverPipeline::new();
        pipeline.register_observer(probe(&log, "check", ObserverRing::InputValidation, 50, true));
        pipeline.register_observer(probe(&log, "db", ObserverRing::Database, 50, false));

        let err = pipeline
            .execute(ObserverContext::new(Entity::Table, Operation::Create))
            .await
            .unwrap_err();

        assert!(matches!(err, ObserverError::ValidationError(ref m) if m == "check"));
        assert_eq!(*log.lock().unwrap(), vec!["check"]);
    }

    #[tokio::test]
    async fn skips_observers_for_other_entities() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = ObserverPipeline::new();
        pipeline.register_observer(probe(&log, "db", ObserverRing::Database, 50, false));

        let err = pipeline
            .execute(ObserverContext::new(Entity::Reservation, Operation::List))
            .await
            .unwrap_err();

        assert!(matches!(err, ObserverError::PipelineError(_)));
        assert!(log.lock().unwrap().is_empty());
    }
}
