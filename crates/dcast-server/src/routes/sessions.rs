//! Device session routes.
//!
//! Exposes the registry over REST plus the raw name-keyed tool dispatch
//! and an SSE feed of stream status events.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use dcast_core::session::DeviceSession;
use dcast_core::types::{DeviceSessionInfo, StreamDefaults, ToolCall};
use dcast_core::{dispatch, Error};

use crate::backend::SimulatedDevice;
use crate::state::AppState;

/// Create session router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route(
            "/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/sessions/{id}/tools/{tool}", post(call_tool))
        .route("/sessions/{id}/status/stream", get(status_stream))
}

/// Map a core error onto an HTTP status
fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::UnknownTool(_) | Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
        Error::UnknownPlatform(_)
        | Error::MissingStreamKey(_)
        | Error::MissingIngestUrl
        | Error::InvalidParams(_) => StatusCode::BAD_REQUEST,
        Error::StreamAlreadyActive(_) | Error::StreamNotActive(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// List all live sessions
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<DeviceSessionInfo>> {
    let mut sessions = state.sessions.list().await;
    sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Json(sessions)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub name: Option<String>,
    pub device_model: Option<String>,
    /// Initial streaming defaults for the session
    #[serde(default)]
    pub defaults: StreamDefaults,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session: DeviceSessionInfo,
}

/// Create a new session backed by the simulated device
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSessionRequest>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let now = chrono::Utc::now().timestamp_millis();
    let info = DeviceSessionInfo {
        id: uuid::Uuid::new_v4().to_string(),
        name: req.name.unwrap_or_else(|| "New Device".to_string()),
        device_model: req.device_model,
        online: true,
        created_at: now,
        updated_at: now,
    };

    let device = Arc::new(SimulatedDevice::new());
    let session = Arc::new(DeviceSession::new(
        info.clone(),
        req.defaults,
        device.clone(),
        device,
    ));
    state.sessions.register(session).await;

    info!("Created session {} ({})", &info.id[..8], info.name);

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session: info }),
    )
}

/// Get a session by ID
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeviceSessionInfo>, (StatusCode, String)> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or((StatusCode::NOT_FOUND, format!("Session not found: {}", id)))?;
    Ok(Json(session.info().clone()))
}

/// Remove a session from the registry
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .sessions
        .remove(&id)
        .await
        .ok_or((StatusCode::NOT_FOUND, format!("Session not found: {}", id)))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Dispatch a named tool invocation; the request body is the parameter bag
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path((id, tool)): Path<(String, String)>,
    Json(args): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or((StatusCode::NOT_FOUND, format!("Session not found: {}", id)))?;

    let call = ToolCall::new(tool, args);
    dispatch::dispatch(&session, &state.status, call)
        .await
        .map(Json)
        .map_err(|e| {
            warn!(session = %id, "Tool dispatch failed: {}", e);
            (error_status(&e), e.to_string())
        })
}

/// SSE feed of stream status events for one session
pub async fn status_stream(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.status.subscribe();
    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) if event.session_id == id => {
                    match Event::default().json_data(&event) {
                        Ok(sse_event) => yield Ok(sse_event),
                        Err(e) => warn!("Failed to encode status event: {}", e),
                    }
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(session = %id, "Status subscriber lagged, skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&Error::UnknownTool("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&Error::UnknownPlatform("kick".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(error_status(&Error::MissingIngestUrl), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_status(&Error::StreamAlreadyActive("s".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&Error::Other("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_create_session_request_defaults_optional() {
        let req: CreateSessionRequest =
            serde_json::from_value(serde_json::json!({ "name": "bench cam" })).unwrap();
        assert_eq!(req.name.as_deref(), Some("bench cam"));
        assert_eq!(req.defaults, StreamDefaults::default());
    }
}
