//! Error types for dcast-core.

use thiserror::Error;

/// Result type alias using dcast-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for dcast operations
#[derive(Error, Debug)]
pub enum Error {
    // Dispatch errors
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    // Stream state errors
    #[error("Stream already active for session {0}")]
    StreamAlreadyActive(String),

    #[error("No active stream for session {0}")]
    StreamNotActive(String),

    // Target resolution errors
    #[error("Missing stream key for platform {0}")]
    MissingStreamKey(String),

    #[error("No stream destination: supply a platform or an RTMP URL")]
    MissingIngestUrl,

    // Backend errors
    #[error("WiFi setup failed: {0}")]
    WifiSetup(String),

    #[error("{capability} capability error: {message}")]
    Capability {
        capability: &'static str,
        message: String,
    },

    // Parameter errors
    #[error("Invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a capability failure
    pub fn capability(capability: &'static str, message: impl Into<String>) -> Self {
        Self::Capability {
            capability,
            message: message.into(),
        }
    }
}
