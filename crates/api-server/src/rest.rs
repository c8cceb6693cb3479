//! Shared REST state and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use outreach_channels::IdentityVerifier;
use outreach_engine::OutreachEngine;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;

/// Shared application state for REST handlers. Built once at startup;
/// every component is passed in by reference, no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<OutreachEngine>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub node_id: String,
    pub start_time: Instant,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

/// GET /health — Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to accept traffic"))
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.start_time.elapsed().as_secs() > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe for Kubernetes.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
