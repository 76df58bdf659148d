use axum::extract::{Path, Query, State};
use serde_json::Value;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, DataPayload};
use crate::observer::{ObserverContext, ReservationQuery};
use crate::types::{Entity, Operation};

/// GET /reservations?date=&mobile_number=
pub async fn list(State(state): State<AppState>, Query(query): Query<ReservationQuery>) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Reservation, Operation::List).with_metadata(query);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::success(data))
}

/// GET /reservations/:reservation_id
pub async fn read(State(state): State<AppState>, Path(reservation_id): Path<String>) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Reservation, Operation::Read).with_target(reservation_id);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::success(data))
}

/// POST /reservations
pub async fn create(State(state): State<AppState>, DataPayload(payload): DataPayload) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Reservation, Operation::Create).with_payload(payload);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::created(data))
}

/// PUT /reservations/:reservation_id
pub async fn update(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    DataPayload(payload): DataPayload,
) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Reservation, Operation::Update)
        .with_target(reservation_id)
        .with_payload(payload);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::success(data))
}

/// PUT /reservations/:reservation_id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    DataPayload(payload): DataPayload,
) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Reservation, Operation::UpdateStatus)
        .with_target(reservation_id)
        .with_payload(payload);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::success(data))
}
