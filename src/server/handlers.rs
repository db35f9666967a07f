//! Route handlers. Each wraps one client call in the success/failure envelope.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::core::catalog::{Tier, probe_tiers};

use super::AppState;
use super::error::ApiError;

const NANOGPT_UNAVAILABLE: &str = "Failed to fetch models from NanoGPT API";
const OPENROUTER_UNAVAILABLE: &str = "Failed to fetch models from OpenRouter API";

/// First `type` parameter, or `all` when there is none.
fn requested_tier(params: &[(String, String)]) -> Tier {
    params
        .iter()
        .find(|(key, _)| key == "type")
        .map_or(Tier::All, |(_, value)| Tier::from_query(value))
}

/// `GET /api/models?type=all|subscription|paid`
pub async fn list_models(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let tier = requested_tier(&params);
    let catalog = state
        .nanogpt
        .fetch_catalog(tier)
        .await
        .map_err(|_| ApiError::Upstream(NANOGPT_UNAVAILABLE))?;
    Ok(Json(json!({"success": true, "data": catalog, "type": tier})).into_response())
}

/// `GET /api/models/{id}`, served from the lookup cache. An unavailable
/// catalog answers 404 like an unknown id.
pub async fn model_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    log::info!("Fetching details for model: {}", id);
    let record = state
        .nanogpt
        .get_model_details(&id)
        .await
        .ok_or(ApiError::NotFound)?;
    Ok(Json(json!({"success": true, "data": record})).into_response())
}

/// `GET /api/openrouter/models`
pub async fn list_openrouter_models(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let catalog = state
        .openrouter
        .fetch_catalog()
        .await
        .map_err(|_| ApiError::Upstream(OPENROUTER_UNAVAILABLE))?;
    Ok(Json(json!({"success": true, "data": catalog})).into_response())
}

/// `GET /api/openrouter/models/{id}`
pub async fn openrouter_model_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    log::info!("Fetching OpenRouter model details for: {}", id);
    let record = state
        .openrouter
        .get_model_details(&id)
        .await
        .ok_or(ApiError::NotFound)?;
    Ok(Json(json!({"success": true, "data": record})).into_response())
}

/// `GET /test-endpoints`: per-tier reachability report, always 200.
pub async fn test_endpoints(State(state): State<Arc<AppState>>) -> Response {
    Json(probe_tiers(&state.nanogpt).await).into_response()
}
