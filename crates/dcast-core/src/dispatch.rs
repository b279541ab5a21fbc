//! Named tool-call dispatch against a device session.
//!
//! Two tools exist: `start_streaming` and `stop_streaming`. Dispatch
//! resolves configuration with fallback order parameter > session default,
//! selects the managed (platform table) or unmanaged (explicit RTMP URL)
//! branch, and delegates the actual work to the session's capabilities.

use serde_json::json;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::session::DeviceSession;
use crate::status::{format_stream_status, StatusBroadcaster};
use crate::types::{
    StartStreamingParams, StopStreamingParams, StreamDefaults, StreamPhase, StreamStatus,
    StreamTarget, ToolCall,
};

/// Tool name for starting a stream.
pub const START_STREAMING: &str = "start_streaming";
/// Tool name for stopping a stream.
pub const STOP_STREAMING: &str = "stop_streaming";

/// All tool names this dispatcher understands.
pub const TOOL_NAMES: &[&str] = &[START_STREAMING, STOP_STREAMING];

/// Dispatch a named tool invocation against a session.
pub async fn dispatch(
    session: &DeviceSession,
    broadcaster: &StatusBroadcaster,
    call: ToolCall,
) -> Result<serde_json::Value> {
    // Tolerate an absent bag; both tools accept an empty one.
    let args = if call.args.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        call.args
    };

    match call.name.as_str() {
        START_STREAMING => {
            let params: StartStreamingParams = serde_json::from_value(args)?;
            start_streaming(session, broadcaster, params).await
        }
        STOP_STREAMING => {
            let _params: StopStreamingParams = serde_json::from_value(args)?;
            stop_streaming(session, broadcaster).await
        }
        other => {
            warn!(
                tool = other,
                "Unknown tool; expected one of: {}",
                TOOL_NAMES.join(", ")
            );
            Err(Error::UnknownTool(other.to_string()))
        }
    }
}

/// Start streaming from a session.
///
/// Joins WiFi first when credentials are supplied, resolves the target
/// (parameter > session default), rejects a double start, delegates to the
/// streaming capability, persists the resolved target as the new session
/// defaults, and broadcasts the status.
pub async fn start_streaming(
    session: &DeviceSession,
    broadcaster: &StatusBroadcaster,
    params: StartStreamingParams,
) -> Result<serde_json::Value> {
    if let Some(creds) = &params.wifi {
        info!(
            session = session.id(),
            ssid = %creds.ssid,
            "Joining WiFi network before stream start"
        );
        session.wifi().join_network(creds).await.map_err(|e| {
            warn!(session = session.id(), "WiFi join failed: {}", e);
            e
        })?;
    }

    let defaults = session.defaults().await;
    let target = resolve_target(&params, &defaults)?;

    let status = session.streaming().stream_status().await?;
    if status.phase == StreamPhase::Live {
        return Err(Error::StreamAlreadyActive(session.id().to_string()));
    }

    session.streaming().start_stream(&target).await.map_err(|e| {
        warn!(session = session.id(), "Stream start failed: {}", e);
        e
    })?;

    // Remember the resolved destination so the next call can omit it.
    session.set_defaults(defaults_from_target(&target)).await;

    info!(
        session = session.id(),
        destination = %target.describe(),
        "Stream started"
    );

    let status = StreamStatus::live(target.clone());
    let event = format_stream_status(session.id(), &status);
    broadcaster.broadcast(event.clone());

    Ok(json!({
        "success": true,
        "sessionId": session.id(),
        "rtmpUrl": target.rtmp_url(),
        "status": event,
    }))
}

/// Stop the active stream for a session and broadcast the idle status.
pub async fn stop_streaming(
    session: &DeviceSession,
    broadcaster: &StatusBroadcaster,
) -> Result<serde_json::Value> {
    let status = session.streaming().stream_status().await?;
    if status.phase != StreamPhase::Live {
        return Err(Error::StreamNotActive(session.id().to_string()));
    }

    session.streaming().stop_stream().await.map_err(|e| {
        warn!(session = session.id(), "Stream stop failed: {}", e);
        e
    })?;

    info!(session = session.id(), "Stream stopped");

    let event = format_stream_status(session.id(), &StreamStatus::idle());
    broadcaster.broadcast(event.clone());

    Ok(json!({
        "success": true,
        "sessionId": session.id(),
        "status": event,
    }))
}

/// Resolve the stream destination with fallback order
/// parameter > session default.
///
/// An explicit RTMP URL selects the unmanaged branch; a platform selects
/// the managed branch and requires a stream key (itself subject to the
/// same fallback). Within the parameter tier an explicit URL beats an
/// explicit platform.
fn resolve_target(
    params: &StartStreamingParams,
    defaults: &StreamDefaults,
) -> Result<StreamTarget> {
    if let Some(url) = &params.rtmp_url {
        return Ok(StreamTarget::Custom { url: url.clone() });
    }

    if let Some(raw) = &params.platform {
        let platform = raw.parse()?;
        return managed_target(platform, params, defaults);
    }

    if let Some(url) = &defaults.rtmp_url {
        return Ok(StreamTarget::Custom { url: url.clone() });
    }

    if let Some(platform) = defaults.platform {
        return managed_target(platform, params, defaults);
    }

    Err(Error::MissingIngestUrl)
}

fn managed_target(
    platform: crate::platform::StreamPlatform,
    params: &StartStreamingParams,
    defaults: &StreamDefaults,
) -> Result<StreamTarget> {
    let stream_key = params
        .stream_key
        .clone()
        .or_else(|| defaults.stream_key.clone())
        .ok_or_else(|| Error::MissingStreamKey(platform.to_string()))?;
    Ok(StreamTarget::Managed {
        platform,
        stream_key,
    })
}

/// Session defaults that reproduce a resolved target on a bare start.
fn defaults_from_target(target: &StreamTarget) -> StreamDefaults {
    match target {
        StreamTarget::Managed {
            platform,
            stream_key,
        } => StreamDefaults {
            platform: Some(*platform),
            stream_key: Some(stream_key.clone()),
            rtmp_url: None,
        },
        StreamTarget::Custom { url } => StreamDefaults {
            platform: None,
            stream_key: None,
            rtmp_url: Some(url.clone()),
        },
    }
}
