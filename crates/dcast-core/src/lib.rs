//! dcast-core - Core library for Device Cast
//!
//! This crate provides shared functionality between embedders and dcast-server:
//!
//! - **capability**: seams to the camera/streaming and WiFi-setup backends
//! - **dispatch**: named tool-call routing against a live device session
//! - **platform**: managed streaming platforms and their RTMP ingest endpoints
//! - **session**: device session handles and the in-memory registry
//! - **status**: stream status formatting and broadcast

pub mod capability;
pub mod dispatch;
pub mod error;
pub mod platform;
pub mod session;
pub mod status;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use platform::StreamPlatform;
pub use session::{DeviceSession, SessionRegistry};
pub use status::{format_stream_status, StatusBroadcaster, StreamStatusEvent};
pub use types::{StreamDefaults, StreamStatus, StreamTarget, ToolCall};
