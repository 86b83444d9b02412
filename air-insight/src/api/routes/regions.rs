//! Region lookup routes.
//!
//! All failures come back as `{"error": ...}` with HTTP 200, see
//! [`crate::api::error`].

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    routing::{get, post},
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::{HistoryResponse, StateRequest, SummaryResponse};
use crate::api::server::AppState;

/// Create the regions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/states", get(list_states))
        .route("/state", post(get_state))
        .route("/history/{state}", get(get_history))
}

/// List all region names in dataset order.
///
/// GET /api/states
async fn list_states(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.query_service.list_regions().to_vec())
}

/// Summary metrics for the region named in the body.
///
/// POST /api/state
///
/// The body is parsed as JSON regardless of its content type.
async fn get_state(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SummaryResponse>> {
    let request = StateRequest::from_json(&body).map_err(ApiError::unexpected)?;

    let region = request.region();
    let record = state.query_service.get_summary(region.as_deref())?;

    Ok(Json(record.into()))
}

/// Date-ordered history and trends for a region.
///
/// GET /api/history/{state}
///
/// A path segment that cannot be decoded is reported like any other failure.
async fn get_history(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<HistoryResponse>> {
    let Path(region) = path.map_err(|rejection| ApiError::unexpected(rejection.body_text()))?;
    let history = state.query_service.get_history(&region)?;
    tracing::debug!(
        region = %history.region,
        points = history.records.len(),
        "Serving region history"
    );

    Ok(Json(history.into()))
}
