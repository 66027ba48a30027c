//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`ConsentEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application; every
//! subscriber independently receives every published event.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ConsentEvent
// ---------------------------------------------------------------------------

/// Events emitted by the consent state machine.
///
/// `Changed` carries the new net decision; the two `Show*` variants trigger
/// the external consent UI, which calls back into the mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConsentEvent {
    /// The net consent decision changed.
    Changed {
        granted: bool,
        non_personalized: bool,
    },
    /// A consent-collection form must be shown.
    ShowForm,
    /// The privacy-options form was requested (user-initiated).
    ShowPrivacyOptions,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out event bus.
///
/// Publishing enqueues the event for every current subscriber before
/// returning, so no subscriber can miss an event published before it acts.
pub struct EventBus {
    sender: broadcast::Sender<ConsentEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: ConsentEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ConsentEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
