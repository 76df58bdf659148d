use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::clock::Clock;
use crate::config::{AppConfig, RestaurantConfig, StorageBackend};
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, Repositories};
use crate::handlers::{public, reservations, tables};
use crate::observer::implementations::register_all_observers;
use crate::observer::ObserverPipeline;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ObserverPipeline>,
    pub repositories: Repositories,
}

impl AppState {
    pub fn new(repositories: Repositories, restaurant: &RestaurantConfig, clock: Arc<dyn Clock>) -> Self {
        let mut pipeline = ObserverPipeline::new();
        register_all_observers(&mut pipeline, &repositories, restaurant, clock);

        Self {
            pipeline: Arc::new(pipeline),
            repositories,
        }
    }

    /// Wire repositories for the configured storage backend
    pub async fn from_config(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, DatabaseError> {
        let repositories = match config.database.backend {
            StorageBackend::Postgres => Repositories::postgres(DatabaseManager::connect(&config.database).await?),
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Repositories::memory(Arc::new(MemoryStore::new()))
            }
        };
        Ok(Self::new(repositories, &config.restaurant, clock))
    }
}

/// Build the full router. CORS is optional so tests can skip it.
pub fn app(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(reservation_routes())
        .merge(table_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(reservations::list).post(reservations::create))
        .route(
            "/reservations/:reservation_id",
            get(reservations::read).put(reservations::update),
        )
        .route("/reservations/:reservation_id/status", put(reservations::update_status))
}

fn table_routes() -> Router<AppState> {
    Router::new()
        .route("/tables", get(tables::list).post(tables::create))
        .route(
            "/tables/:table_id",
            get(tables::read).put(tables::seat).delete(tables::clear),
        )
        // Seating sub-resource, same semantics as PUT/DELETE on the table
        .route("/tables/:table_id/seat", put(tables::seat).delete(tables::clear))
}
