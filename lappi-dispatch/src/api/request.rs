//! Dispatch endpoint
//!
//! `POST /make_request?key=<dispatch key>` with a JSON body. The body is
//! handed to the handler bound to `key`; the result comes back as
//! `{"data": <result>}`.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct DispatchQuery {
    pub key: Option<String>,
}

/// POST /make_request
///
/// **Errors:**
/// - 400: missing `key`, body is not JSON, or payload shape rejected by the handler
/// - 404: unknown dispatch key
/// - other statuses per [`ApiError::status_and_code`]
pub async fn make_request(
    State(state): State<AppState>,
    Query(query): Query<DispatchQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let key = query
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing 'key' query parameter".to_string()))?;

    let Json(payload) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let response = state
        .dispatcher
        .dispatch(&key, payload)
        .await
        .map_err(|e| {
            warn!(key = %key, error = %e, "Request failed");
            ApiError::from(e)
        })?;

    Ok(Json(json!({ "data": response.into_value() })))
}

pub fn request_routes() -> Router<AppState> {
    Router::new().route("/make_request", post(make_request))
}
