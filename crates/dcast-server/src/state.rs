//! Application state.

use dcast_core::{SessionRegistry, StatusBroadcaster};
use std::sync::atomic::{AtomicBool, AtomicUsize};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Live device sessions
    pub sessions: Arc<SessionRegistry>,
    /// Stream status fan-out
    pub status: StatusBroadcaster,
    /// Server start time
    pub start_time: Instant,
    /// Whether server is accepting connections
    pub accepting: Arc<AtomicBool>,
    /// Active request count
    pub active_requests: Arc<AtomicUsize>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            sessions: Arc::new(SessionRegistry::new()),
            status: StatusBroadcaster::default(),
            start_time: Instant::now(),
            accepting: Arc::new(AtomicBool::new(true)),
            active_requests: Arc::new(AtomicUsize::new(0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_state_starts_empty() {
        let state = AppState::new(Config::default());
        assert_eq!(state.sessions.count().await, 0);
        assert_eq!(state.status.receiver_count(), 0);
        assert!(state.start_time.elapsed().as_secs() < 1);
    }
}
