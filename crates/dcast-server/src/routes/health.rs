//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub metrics: HealthMetrics,
}

#[derive(Serialize)]
pub struct HealthMetrics {
    pub sessions: usize,
    pub status_receivers: usize,
    pub pending_requests: usize,
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let sessions = state.sessions.count().await;
    let status_receivers = state.status.receiver_count();
    let pending_requests = state
        .active_requests
        .load(std::sync::atomic::Ordering::SeqCst);

    let status = if state.accepting.load(std::sync::atomic::Ordering::SeqCst) {
        "healthy"
    } else {
        "draining"
    };

    Json(HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        metrics: HealthMetrics {
            sessions,
            status_receivers,
            pending_requests,
        },
    })
}
