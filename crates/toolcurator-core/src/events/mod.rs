//! Curation event bus
//!
//! Pub/sub over `tokio::sync::broadcast`. The bus is owned by the
//! `PlatformContext` and handed to components; there is no process-wide
//! instance.
//!
//! ```text
//! ToolCurator / VersionManager / ToolRegistry
//!      ↓ publish(CuratorEvent)
//! EventBus → broadcast::Sender
//!      ↓
//! every live subscriber
//! ```

pub mod topics;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Default channel capacity
pub const DEFAULT_CAPACITY: usize = 256;

/// An event emitted by a curator component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratorEvent {
    pub id: String,
    /// Emitting component, e.g. `"curator"`
    pub source: String,
    /// Routing key, see [`topics`]
    pub topic: String,
    pub payload: Value,
    pub timestamp: DateTime<Utc>,
}

impl CuratorEvent {
    pub fn new(source: impl Into<String>, topic: impl Into<String>, payload: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            topic: topic.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for CuratorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} -> {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.source,
            self.topic,
            self.payload
        )
    }
}

/// Broadcast event bus
///
/// Cloning shares the underlying channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CuratorEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Publish to all subscribers
    ///
    /// Returns how many subscribers received the event; 0 with no
    /// subscribers is not an error.
    pub fn publish(&self, event: CuratorEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn emit(&self, source: &str, topic: &str, payload: Value) -> usize {
        self.publish(CuratorEvent::new(source, topic, payload))
    }

    /// Receive all events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<CuratorEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
