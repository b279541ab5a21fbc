//! Capability seams to the device backend.
//!
//! The actual streaming stack and WiFi provisioning live outside this
//! crate; sessions hold these traits as opaque handles. Implementations
//! must be cheap to clone behind `Arc` and safe to call concurrently.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{StreamStatus, StreamTarget, WifiCredentials};

/// Camera/streaming capability of a device session.
#[async_trait]
pub trait StreamingCapability: Send + Sync {
    /// Start pushing to the resolved target.
    async fn start_stream(&self, target: &StreamTarget) -> Result<()>;

    /// Stop the active stream.
    async fn stop_stream(&self) -> Result<()>;

    /// Report the current stream state.
    async fn stream_status(&self) -> Result<StreamStatus>;
}

/// WiFi-setup capability of a device session.
#[async_trait]
pub trait WifiSetupCapability: Send + Sync {
    /// Join the device to a network.
    async fn join_network(&self, creds: &WifiCredentials) -> Result<()>;

    /// Whether the device currently has network connectivity.
    async fn is_connected(&self) -> Result<bool>;
}
