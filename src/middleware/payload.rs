use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::error::ApiError;

/// The `data` member of a `{ "data": { ... } }` request body.
///
/// An empty body, or one without `data`, yields `None` so the observers can
/// report which field is missing. Malformed JSON is rejected with a 400.
#[derive(Debug, Clone, Default)]
pub struct DataPayload(pub Option<Value>);

#[async_trait]
impl<S> FromRequest<S> for DataPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(DataPayload(None));
        }

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?;

        Ok(DataPayload(body.get("data").filter(|v| !v.is_null()).cloned()))
    }
}
