//! Shared types for dcast-core.
//!
//! These types are used by both the dispatch layer and the server surface.

use serde::{Deserialize, Serialize};

use crate::platform::StreamPlatform;

// ─────────────────────────────────────────────────────────────────────────────
// Entity Types
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata for a live device session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSessionInfo {
    pub id: String,
    pub name: String,
    pub device_model: Option<String>,
    pub online: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Session-stored streaming defaults.
///
/// Dispatch resolves configuration with fallback order
/// parameter > session default; these are the second tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamDefaults {
    pub platform: Option<StreamPlatform>,
    pub stream_key: Option<String>,
    pub rtmp_url: Option<String>,
}

/// WiFi network credentials for device setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiCredentials {
    pub ssid: String,
    pub passphrase: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tool Parameter Types
// ─────────────────────────────────────────────────────────────────────────────

/// A named tool invocation with its raw parameter bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Parameters accepted by the `start_streaming` tool.
///
/// The platform arrives as a raw string so resolution can report the
/// offending value on an unknown platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartStreamingParams {
    pub platform: Option<String>,
    pub stream_key: Option<String>,
    pub rtmp_url: Option<String>,
    pub wifi: Option<WifiCredentials>,
}

/// Parameters accepted by the `stop_streaming` tool. Empty; unknown fields
/// in the bag are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopStreamingParams {}

// ─────────────────────────────────────────────────────────────────────────────
// Stream State Types
// ─────────────────────────────────────────────────────────────────────────────

/// A fully resolved stream destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StreamTarget {
    /// A managed platform; the ingest URL comes from the platform table.
    #[serde(rename_all = "camelCase")]
    Managed {
        platform: StreamPlatform,
        stream_key: String,
    },
    /// An explicit caller-supplied RTMP URL.
    #[serde(rename_all = "camelCase")]
    Custom { url: String },
}

impl StreamTarget {
    /// Final RTMP publish URL for this target.
    pub fn rtmp_url(&self) -> String {
        match self {
            StreamTarget::Managed {
                platform,
                stream_key,
            } => platform.ingest_url(stream_key),
            StreamTarget::Custom { url } => url.clone(),
        }
    }

    /// Short human-readable destination label.
    pub fn describe(&self) -> String {
        match self {
            StreamTarget::Managed { platform, .. } => platform.to_string(),
            StreamTarget::Custom { .. } => "custom".to_string(),
        }
    }
}

/// Stream lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamPhase {
    Idle,
    Live,
}

impl std::fmt::Display for StreamPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamPhase::Idle => write!(f, "idle"),
            StreamPhase::Live => write!(f, "live"),
        }
    }
}

/// Current stream state as reported by the streaming capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStatus {
    pub phase: StreamPhase,
    pub target: Option<StreamTarget>,
    /// Milliseconds since epoch when the stream went live.
    pub since: Option<i64>,
}

impl StreamStatus {
    /// Status for a session with no active stream.
    pub fn idle() -> Self {
        Self {
            phase: StreamPhase::Idle,
            target: None,
            since: None,
        }
    }

    /// Status for a live stream that started now.
    pub fn live(target: StreamTarget) -> Self {
        Self {
            phase: StreamPhase::Live,
            target: Some(target),
            since: Some(chrono::Utc::now().timestamp_millis()),
        }
    }
}
