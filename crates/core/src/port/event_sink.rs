// Event Sink Port (Interface)
//
// Fire-and-forget lifecycle event delivery. The default dispatcher is
// a plain observer list: listeners run synchronously, in registration
// order, and the core never looks at a return value.

use crate::domain::ConnectionEvent;

/// Consumer of lifecycle events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ConnectionEvent);
}

/// A registered listener callback
pub type EventListener = Box<dyn Fn(&ConnectionEvent) + Send + Sync>;

/// Synchronous observer-list dispatcher.
///
/// Listeners are registered before the dispatcher is shared (it is
/// typically wrapped in an `Arc` and handed to the factory), which
/// keeps emission lock-free.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<EventListener>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; invocation order follows registration order
    pub fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl EventSink for EventDispatcher {
    fn emit(&self, event: ConnectionEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }
}
