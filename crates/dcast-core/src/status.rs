//! Stream status formatting and broadcast.
//!
//! After a start or stop the dispatcher formats the session's stream
//! state into a `StreamStatusEvent` and pushes it onto a broadcast
//! channel. Subscribers (the SSE feed, embedders) each get their own
//! receiver; a send with no receivers is not an error.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::types::{StreamPhase, StreamStatus, StreamTarget};

/// Default broadcast channel capacity. Slow subscribers lag rather than
/// block the dispatcher.
pub const DEFAULT_CAPACITY: usize = 64;

/// A formatted stream status update for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStatusEvent {
    pub session_id: String,
    pub phase: StreamPhase,
    pub target: Option<StreamTarget>,
    pub rtmp_url: Option<String>,
    /// Milliseconds since epoch when this event was formatted.
    pub timestamp: i64,
}

/// Format a session's stream state into a broadcastable event.
pub fn format_stream_status(session_id: &str, status: &StreamStatus) -> StreamStatusEvent {
    StreamStatusEvent {
        session_id: session_id.to_string(),
        phase: status.phase,
        target: status.target.clone(),
        rtmp_url: status.target.as_ref().map(|t| t.rtmp_url()),
        timestamp: chrono::Utc::now().timestamp_millis(),
    }
}

/// Fan-out channel for stream status updates.
#[derive(Clone)]
pub struct StatusBroadcaster {
    tx: broadcast::Sender<StreamStatusEvent>,
}

impl StatusBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future status events.
    pub fn subscribe(&self) -> broadcast::Receiver<StreamStatusEvent> {
        self.tx.subscribe()
    }

    /// Broadcast an event to all subscribers. No receivers is fine.
    pub fn broadcast(&self, event: StreamStatusEvent) {
        match self.tx.send(event) {
            Ok(receivers) => {
                debug!("Broadcast stream status to {} receiver(s)", receivers);
            }
            Err(_) => {
                debug!("No stream status receivers");
            }
        }
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for StatusBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
