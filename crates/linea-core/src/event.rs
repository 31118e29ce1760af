//! Lifecycle signal bus connecting interaction controllers to the
//! rendering layer.
//!
//! Interaction controllers (move, resize, connect) publish drag lifecycle
//! signals; the preview layer subscribes to exactly one of them,
//! [`Lifecycle::DragCleanup`], to release cloned marker resources. The bus
//! is strictly single-threaded and synchronous: firing a signal invokes
//! every handler to completion before returning.

use std::collections::HashMap;
use std::fmt;

/// Drag interaction lifecycle signals.
///
/// Controllers fire `DragCleanup` exactly once per gesture, after
/// `DragEnd` or `DragCancel`; release semantics are identical for both
/// outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    DragStart,
    DragMove,
    DragEnd,
    DragCancel,
    DragCleanup,
}

type Handler = Box<dyn FnMut()>;

/// Single-threaded publish/subscribe bus for lifecycle signals.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<Lifecycle, Vec<Handler>>,
}

impl EventBus {
    /// Create a bus with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler to a signal.
    pub fn on(&mut self, signal: Lifecycle, handler: impl FnMut() + 'static) {
        self.handlers.entry(signal).or_default().push(Box::new(handler));
    }

    /// Fire a signal, invoking its handlers in subscription order.
    ///
    /// Firing a signal nobody subscribed to is a no-op.
    pub fn fire(&mut self, signal: Lifecycle) {
        if let Some(handlers) = self.handlers.get_mut(&signal) {
            for handler in handlers {
                handler();
            }
        }
    }

    /// Number of handlers subscribed to a signal.
    pub fn subscriber_count(&self, signal: Lifecycle) -> usize {
        self.handlers.get(&signal).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("signals", &self.handlers.len())
            .field("handlers", &self.handlers.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
