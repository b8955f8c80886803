//! Session event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::SessionEvent;

/// Trait for receiving session events.
///
/// Implementations translate session events into platform-specific actions.
/// The session service emits events through this trait after successful
/// state changes.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls, no disk writes)
/// - Implementations should queue events for async processing
/// - Failure to emit must not affect session operations (best-effort)
pub trait SessionEventSink: Send + Sync {
    /// Emit a single session event.
    fn emit(&self, event: SessionEvent);
}

/// No-op implementation for tests or contexts that don't need events.
#[derive(Clone, Default)]
pub struct NoOpSessionEventSink;

impl SessionEventSink for NoOpSessionEventSink {
    fn emit(&self, _event: SessionEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockSessionEventSink {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl MockSessionEventSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl SessionEventSink for MockSessionEventSink {
    fn emit(&self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}
