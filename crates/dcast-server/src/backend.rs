//! Simulated device backend.
//!
//! Implements both capability traits in memory so the server can mint
//! working sessions without camera hardware. This is not a camera or
//! WiFi stack; it only tracks what a real backend would have been told.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use dcast_core::capability::{StreamingCapability, WifiSetupCapability};
use dcast_core::error::{Error, Result};
use dcast_core::types::{StreamStatus, StreamTarget, WifiCredentials};

struct ActiveStream {
    target: StreamTarget,
    since: i64,
}

/// In-memory stand-in for a camera device.
#[derive(Default)]
pub struct SimulatedDevice {
    stream: Mutex<Option<ActiveStream>>,
    network: Mutex<Option<String>>,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StreamingCapability for SimulatedDevice {
    async fn start_stream(&self, target: &StreamTarget) -> Result<()> {
        let mut stream = self.stream.lock().await;
        debug!(url = %target.rtmp_url(), "Simulated device: stream started");
        *stream = Some(ActiveStream {
            target: target.clone(),
            since: chrono::Utc::now().timestamp_millis(),
        });
        Ok(())
    }

    async fn stop_stream(&self) -> Result<()> {
        let mut stream = self.stream.lock().await;
        debug!("Simulated device: stream stopped");
        *stream = None;
        Ok(())
    }

    async fn stream_status(&self) -> Result<StreamStatus> {
        let stream = self.stream.lock().await;
        Ok(match stream.as_ref() {
            Some(active) => StreamStatus {
                phase: dcast_core::types::StreamPhase::Live,
                target: Some(active.target.clone()),
                since: Some(active.since),
            },
            None => StreamStatus::idle(),
        })
    }
}

#[async_trait]
impl WifiSetupCapability for SimulatedDevice {
    async fn join_network(&self, creds: &WifiCredentials) -> Result<()> {
        if creds.ssid.trim().is_empty() {
            return Err(Error::WifiSetup("empty SSID".to_string()));
        }
        let mut network = self.network.lock().await;
        debug!(ssid = %creds.ssid, "Simulated device: joined network");
        *network = Some(creds.ssid.clone());
        Ok(())
    }

    async fn is_connected(&self) -> Result<bool> {
        Ok(self.network.lock().await.is_some())
    }
}
