//! JSON status API over the liveness registry

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::ingest::{ActivityEvent, ActivityFeed};
use crate::key::DeviceKey;
use crate::tracker::LivenessTracker;

/// API application state
#[derive(Debug, Clone)]
pub struct ApiState {
    pub tracker: LivenessTracker,
    pub feed: ActivityFeed,
}

/// Build the status API router
pub fn build_router(tracker: LivenessTracker, feed: ActivityFeed) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/devices", get(devices_handler))
        .route("/api/device", get(device_query_handler))
        .route("/api/devices/{area_id}/{system_type}", get(device_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/activity", post(activity_handler))
        .with_state(ApiState { tracker, feed })
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}

async fn devices_handler(State(api): State<ApiState>) -> impl IntoResponse {
    Json(api.tracker.snapshot())
}

async fn device_handler(
    State(api): State<ApiState>,
    Path((area_id, system_type)): Path<(String, String)>,
) -> impl IntoResponse {
    Json(api.tracker.status(&DeviceKey::new(area_id, system_type)))
}

/// Query form of the device lookup. Accepts keys the path form cannot
/// carry, such as an empty part or one containing `/`.
#[derive(Debug, Deserialize)]
struct DeviceQuery {
    area_id: String,
    system_type: String,
}

async fn device_query_handler(
    State(api): State<ApiState>,
    Query(query): Query<DeviceQuery>,
) -> impl IntoResponse {
    Json(api.tracker.status(&DeviceKey::new(query.area_id, query.system_type)))
}

async fn summary_handler(State(api): State<ApiState>) -> impl IntoResponse {
    Json(api.tracker.summary())
}

async fn activity_handler(
    State(api): State<ApiState>,
    Json(event): Json<ActivityEvent>,
) -> impl IntoResponse {
    match api.feed.report(event).await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::warn!("Rejecting activity report: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
