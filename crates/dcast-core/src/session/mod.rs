//! Device session handles and the in-memory registry.
//!
//! A `DeviceSession` is the live session object the dispatcher works
//! against: identity, the two capability handles, and the session-stored
//! streaming defaults. The registry keys sessions by id.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::capability::{StreamingCapability, WifiSetupCapability};
use crate::types::{DeviceSessionInfo, StreamDefaults};

/// A live device session.
pub struct DeviceSession {
    info: DeviceSessionInfo,
    defaults: RwLock<StreamDefaults>,
    streaming: Arc<dyn StreamingCapability>,
    wifi: Arc<dyn WifiSetupCapability>,
}

impl DeviceSession {
    pub fn new(
        info: DeviceSessionInfo,
        defaults: StreamDefaults,
        streaming: Arc<dyn StreamingCapability>,
        wifi: Arc<dyn WifiSetupCapability>,
    ) -> Self {
        Self {
            info,
            defaults: RwLock::new(defaults),
            streaming,
            wifi,
        }
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn info(&self) -> &DeviceSessionInfo {
        &self.info
    }

    /// The camera/streaming capability handle.
    pub fn streaming(&self) -> &dyn StreamingCapability {
        self.streaming.as_ref()
    }

    /// The WiFi-setup capability handle.
    pub fn wifi(&self) -> &dyn WifiSetupCapability {
        self.wifi.as_ref()
    }

    /// Snapshot of the session-stored streaming defaults.
    pub async fn defaults(&self) -> StreamDefaults {
        self.defaults.read().await.clone()
    }

    /// Replace the session-stored streaming defaults.
    pub async fn set_defaults(&self, defaults: StreamDefaults) {
        *self.defaults.write().await = defaults;
    }
}

/// Registry of live device sessions, keyed by session id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<DeviceSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, session: Arc<DeviceSession>) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().to_string(), session);
    }

    pub async fn get(&self, id: &str) -> Option<Arc<DeviceSession>> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    pub async fn remove(&self, id: &str) -> Option<Arc<DeviceSession>> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id)
    }

    pub async fn list(&self) -> Vec<DeviceSessionInfo> {
        let sessions = self.sessions.read().await;
        sessions.values().map(|s| s.info().clone()).collect()
    }

    pub async fn count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}
