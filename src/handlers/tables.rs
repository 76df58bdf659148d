use axum::extract::{Path, State};
use serde_json::Value;

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, DataPayload};
use crate::observer::ObserverContext;
use crate::types::{Entity, Operation};

/// GET /tables
pub async fn list(State(state): State<AppState>) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Table, Operation::List);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::success(data))
}

/// GET /tables/:table_id
pub async fn read(State(state): State<AppState>, Path(table_id): Path<String>) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Table, Operation::Read).with_target(table_id);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::success(data))
}

/// POST /tables
pub async fn create(State(state): State<AppState>, DataPayload(payload): DataPayload) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Table, Operation::Create).with_payload(payload);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::created(data))
}

/// PUT /tables/:table_id - seat a reservation
pub async fn seat(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
    DataPayload(payload): DataPayload,
) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Table, Operation::Seat)
        .with_target(table_id)
        .with_payload(payload);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::success(data))
}

/// DELETE /tables/:table_id - clear the table and finish its reservation
pub async fn clear(State(state): State<AppState>, Path(table_id): Path<String>) -> ApiResult<Value> {
    let ctx = ObserverContext::new(Entity::Table, Operation::Clear).with_target(table_id);
    let data = state.pipeline.execute(ctx).await?;
    Ok(ApiResponse::success(data))
}
